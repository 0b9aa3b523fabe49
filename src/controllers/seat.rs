use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::{Location, NewSeat, Seat};
use crate::scan::CodeImageEncoder;
use crate::schemas::seat::{CreateSeatRequest, SeatResponse};
use crate::{Config, DbPool};

/// Create a batch of seats for a location
///
/// Seats are laid out by administrators in bulk; each one gets a
/// scannable code bound to its stable deep link.
#[instrument(skip(pool, request))]
pub async fn create_location_seats(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Path(l_id): Path<i32>,
	Json(request): Json<Vec<CreateSeatRequest>>,
) -> Result<impl IntoResponse, Error> {
	for seat in &request {
		seat.validate()?;
	}

	let conn = pool.get().await?;

	// Reject unknown locations before attempting the batch
	let location = Location::get_by_id(l_id, &conn).await?;

	let new_seats: Vec<NewSeat> = request
		.into_iter()
		.map(|s| s.to_insertable(location.id, &config.base_url))
		.collect();
	let seats = NewSeat::bulk_insert(new_seats, &conn).await?;
	let response: Vec<SeatResponse> =
		seats.into_iter().map(Into::into).collect();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_location_seats(
	State(pool): State<DbPool>,
	Path(l_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let seats = Seat::for_location(l_id, &conn).await?;
	let response: Vec<SeatResponse> =
		seats.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn activate_seat(
	State(pool): State<DbPool>,
	Path(s_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let seat = Seat::set_active(s_id, true, &conn).await?;

	Ok((StatusCode::OK, Json(SeatResponse::from(seat))))
}

#[instrument(skip(pool))]
pub async fn deactivate_seat(
	State(pool): State<DbPool>,
	Path(s_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let seat = Seat::set_active(s_id, false, &conn).await?;

	Ok((StatusCode::OK, Json(SeatResponse::from(seat))))
}

/// Render the scannable code image for a seat
///
/// A failed encode is recoverable; the seat stays usable through its
/// deep link, the image is just unavailable.
#[instrument(skip(pool, encoder))]
pub async fn get_seat_code(
	State(pool): State<DbPool>,
	State(encoder): State<CodeImageEncoder>,
	Path(s_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let seat = Seat::get_by_id(s_id, &conn).await?;

	match encoder(&seat.code_url) {
		Some(image) => Ok((
			StatusCode::OK,
			[(header::CONTENT_TYPE, "image/png")],
			image,
		)),
		None => {
			warn!("code image unavailable for seat {s_id}");

			Err(Error::NotFound(format!(
				"no code image available for seat {s_id}"
			)))
		},
	}
}
