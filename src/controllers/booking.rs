use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::availability::Availability;
use crate::clock::Clock;
use crate::error::Error;
use crate::interval;
use crate::models::{Booking, NewBooking, Seat, TimeSlot};
use crate::notifier::{NotificationKind, Notifier};
use crate::schemas::booking::{
	AvailabilityQuery,
	AvailabilityResponse,
	BookingResponse,
	CancelBookingRequest,
	CheckInMode,
	CheckInRequest,
	CreateBookingRequest,
};
use crate::validator as checks;
use crate::{Config, DbPool};

/// Create a booking
///
/// Runs the full admission-control sequence, then inserts through the
/// serializable conflict-guarded transaction so a racing request for an
/// overlapping interval cannot double-book the seat.
#[instrument(skip(pool, notifier))]
pub async fn create_booking(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	State(notifier): State<Notifier>,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let start = interval::parse_time(&request.start_time)?;
	let end = interval::parse_time(&request.end_time)?;

	let conn = pool.get().await?;

	let seat = Seat::get_by_id(request.seat_id, &conn).await?;
	checks::check_seat(&seat)?;

	let slot = match request.time_slot_id {
		Some(t_id) => {
			let slot = TimeSlot::get_by_id(t_id, &conn).await?;
			checks::check_time_slot(&slot)?;

			Some(slot)
		},
		None => None,
	};

	let rules = config.booking_rules();
	let today = clock.today();

	checks::check_date(request.day, today, rules.advance_booking_days)?;

	let duration_minutes = checks::check_duration(start, end)?;

	match &slot {
		Some(slot) => {
			checks::check_slot_bounds(
				slot,
				request.day,
				start,
				end,
				duration_minutes,
			)?;
		},
		None => {
			checks::check_default_duration(
				duration_minutes,
				rules.default_max_minutes,
			)?;
		},
	}

	let existing = Booking::for_seat_on_day(seat.id, request.day, &conn).await?;
	checks::check_conflicts(&existing, start, end)?;

	let daily =
		Booking::daily_count_for_user(request.user_id, request.day, &conn)
			.await?;
	let standing =
		Booking::standing_count_for_user(request.user_id, today, &conn).await?;
	checks::check_quotas(daily, standing, &rules)?;

	let new_booking = NewBooking {
		seat_id: seat.id,
		user_id: request.user_id,
		time_slot_id: slot.map(|s| s.id),
		day: request.day,
		start_time: start,
		end_time: end,
		duration_minutes,
		notes: request.notes,
	};

	let booking = new_booking.insert_guarded(&conn).await?;

	notifier.notify(NotificationKind::Confirmation, booking.id);

	Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// Cancel a booking
///
/// Owners may cancel up to the cutoff before start; privileged
/// requesters bypass both the ownership and the cutoff rule.
#[instrument(skip(pool, notifier))]
pub async fn cancel_booking(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	State(notifier): State<Notifier>,
	Path(b_id): Path<i32>,
	Json(request): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let booking = Booking::get_by_id(b_id, &conn).await?;

	checks::check_cancellation(
		&booking,
		request.requester_id,
		request.requester_is_privileged,
		&clock,
		config.cancellation_cutoff_minutes,
	)?;

	let cancelled =
		Booking::cancel(b_id, request.reason, clock.now(), &conn).await?;

	notifier.notify(NotificationKind::Cancellation, cancelled.id);

	Ok((StatusCode::OK, Json(BookingResponse::from(cancelled))))
}

/// Check in a booking under the admin or self-service window
#[instrument(skip(pool))]
pub async fn check_in_booking(
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	Path(b_id): Path<i32>,
	Json(request): Json<CheckInRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(b_id, &conn).await?;

	// Self check-in only works on your own booking
	if request.mode == CheckInMode::SelfService
		&& request.actor_id != booking.user_id
	{
		return Err(Error::Unauthorized);
	}

	checks::check_check_in(&booking, request.mode.into(), &clock)?;

	let checked = Booking::check_in(b_id, clock.now(), &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(checked))))
}

/// Check out a booking, completing it
#[instrument(skip(pool))]
pub async fn check_out_booking(
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(b_id, &conn).await?;

	checks::check_check_out(&booking)?;

	let checked = Booking::check_out(b_id, clock.now(), &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(checked))))
}

/// Mark a confirmed booking as a no-show (administrative action)
#[instrument(skip(pool))]
pub async fn mark_booking_no_show(
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let marked = Booking::mark_no_show(b_id, clock.now(), &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(marked))))
}

/// Get the availability picture of a seat for one date
#[instrument(skip(pool))]
pub async fn get_seat_availability(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	State(clock): State<Clock>,
	Path(s_id): Path<i32>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let seat = Seat::get_by_id(s_id, &conn).await?;

	let bookings = Booking::for_seat_on_day(seat.id, query.date, &conn).await?;
	let availability = Availability::build(
		bookings,
		&clock,
		config.completion_buffer_minutes,
	);

	Ok((StatusCode::OK, Json(AvailabilityResponse::from(availability))))
}
