use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::clock::Clock;
use crate::error::Error;
use crate::models::{Booking, Seat};
use crate::scan;
use crate::schemas::booking::AvailabilityResponse;
use crate::schemas::seat::SeatResponse;
use crate::{Config, DbPool};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScanQuery {
	pub payload: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
	pub seat:         SeatResponse,
	pub availability: AvailabilityResponse,
}

/// Resolve a scanned seat code and render its current-day availability
///
/// Accepts both the deep-link URL payload and the legacy JSON envelope.
#[instrument(skip(pool))]
pub async fn resolve_scan(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	Query(query): Query<ScanQuery>,
) -> Result<impl IntoResponse, Error> {
	let target = scan::parse_scan_payload(&query.payload)?;

	let conn = pool.get().await?;

	let seat = Seat::get_by_location_and_number(
		target.location_id,
		target.seat_number,
		&conn,
	)
	.await?;

	let today = clock.today();
	let bookings = Booking::for_seat_on_day(seat.id, today, &conn).await?;
	let availability = Availability::build(
		bookings,
		&clock,
		config.completion_buffer_minutes,
	);

	let response = ScanResponse {
		seat:         seat.into(),
		availability: availability.into(),
	};

	Ok((StatusCode::OK, Json(response)))
}
