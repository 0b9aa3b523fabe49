use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::BookingStatus;
use crate::DbConn;
use crate::error::{BookingError, Error};
use crate::schema::booking;

/// A single-day exclusive claim on a seat for a `[start, end)` interval
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct Booking {
	pub id:               i32,
	pub seat_id:          i32,
	pub user_id:          i32,
	pub time_slot_id:     Option<i32>,
	pub day:              NaiveDate,
	pub start_time:       NaiveTime,
	pub end_time:         NaiveTime,
	pub duration_minutes: i32,
	pub status:           BookingStatus,
	pub checked_in:       bool,
	pub checked_in_at:    Option<NaiveDateTime>,
	pub checked_out:      bool,
	pub checked_out_at:   Option<NaiveDateTime>,
	pub cancelled_at:     Option<NaiveDateTime>,
	pub cancel_reason:    Option<String>,
	pub notes:            Option<String>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl Booking {
	/// Get a [`Booking`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let booking = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				booking.find(b_id).select(Self::as_select()).get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("no booking with id {b_id}"))
				},
				e => e.into(),
			})?;

		Ok(booking)
	}

	/// Get every booking for a seat on a given civil date, all statuses
	/// included, ordered by start time
	#[instrument(skip(conn))]
	pub async fn for_seat_on_day(
		s_id: i32,
		date: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				booking
					.filter(seat_id.eq(s_id))
					.filter(day.eq(date))
					.select(Self::as_select())
					.order(start_time.asc())
					.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Count a user's confirmed/completed bookings on one date
	#[instrument(skip(conn))]
	pub async fn daily_count_for_user(
		u_id: i32,
		date: NaiveDate,
		conn: &DbConn,
	) -> Result<i64, Error> {
		let count = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				booking
					.filter(user_id.eq(u_id))
					.filter(day.eq(date))
					.filter(status.eq_any([
						BookingStatus::Confirmed,
						BookingStatus::Completed,
					]))
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(count)
	}

	/// Count a user's confirmed bookings dated `from_day` or later
	#[instrument(skip(conn))]
	pub async fn standing_count_for_user(
		u_id: i32,
		from_day: NaiveDate,
		conn: &DbConn,
	) -> Result<i64, Error> {
		let count = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				booking
					.filter(user_id.eq(u_id))
					.filter(day.ge(from_day))
					.filter(status.eq(BookingStatus::Confirmed))
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(count)
	}

	/// Get all confirmed bookings dated on any of the given days
	///
	/// Used by the reconciliation sweep, which only ever looks at
	/// yesterday and today.
	#[instrument(skip(conn))]
	pub async fn confirmed_on_days(
		days: Vec<NaiveDate>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				booking
					.filter(day.eq_any(days))
					.filter(status.eq(BookingStatus::Confirmed))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Cancel a booking with an optional reason
	///
	/// The update is conditional on `status = confirmed` so a cancel can
	/// never reopen a terminal booking, even when racing the sweep.
	#[instrument(skip(conn))]
	pub async fn cancel(
		b_id: i32,
		reason: Option<String>,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let cancelled = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				diesel::update(
					booking
						.filter(id.eq(b_id))
						.filter(status.eq(BookingStatus::Confirmed)),
				)
				.set((
					status.eq(BookingStatus::Cancelled),
					cancelled_at.eq(now),
					cancel_reason.eq(reason),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??
			.ok_or_else(|| {
				BookingError::IllegalStateTransition(
					"the booking is no longer cancellable".to_string(),
				)
			})?;

		info!("cancelled booking {b_id}");

		Ok(cancelled)
	}

	/// Record a check-in on a confirmed, not yet checked-in booking
	#[instrument(skip(conn))]
	pub async fn check_in(
		b_id: i32,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let checked = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				diesel::update(
					booking
						.filter(id.eq(b_id))
						.filter(status.eq(BookingStatus::Confirmed))
						.filter(checked_in.eq(false)),
				)
				.set((
					checked_in.eq(true),
					checked_in_at.eq(now),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??
			.ok_or_else(|| {
				BookingError::IllegalStateTransition(
					"the booking cannot be checked in".to_string(),
				)
			})?;

		info!("checked in booking {b_id}");

		Ok(checked)
	}

	/// Record a check-out and complete the booking in the same update
	#[instrument(skip(conn))]
	pub async fn check_out(
		b_id: i32,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let checked = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				diesel::update(
					booking
						.filter(id.eq(b_id))
						.filter(status.eq(BookingStatus::Confirmed))
						.filter(checked_in.eq(true))
						.filter(checked_out.eq(false)),
				)
				.set((
					checked_out.eq(true),
					checked_out_at.eq(now),
					status.eq(BookingStatus::Completed),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??
			.ok_or_else(|| {
				BookingError::IllegalStateTransition(
					"the booking cannot be checked out".to_string(),
				)
			})?;

		info!("checked out booking {b_id}");

		Ok(checked)
	}

	/// Mark a confirmed booking as a no-show
	#[instrument(skip(conn))]
	pub async fn mark_no_show(
		b_id: i32,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let marked = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				diesel::update(
					booking
						.filter(id.eq(b_id))
						.filter(status.eq(BookingStatus::Confirmed)),
				)
				.set((status.eq(BookingStatus::NoShow), updated_at.eq(now)))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??
			.ok_or_else(|| {
				BookingError::IllegalStateTransition(
					"only confirmed bookings can be marked no-show".to_string(),
				)
			})?;

		info!("marked booking {b_id} as no-show");

		Ok(marked)
	}

	/// Move a batch of bookings from confirmed to completed in a single
	/// conditional update
	///
	/// Rows that left the confirmed state since being selected are
	/// skipped, so a racing cancellation is never resurrected.
	#[instrument(skip(conn))]
	pub async fn complete_many(
		ids: Vec<i32>,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<usize, Error> {
		let completed = conn
			.interact(move |conn| {
				use crate::schema::booking::dsl::*;

				diesel::update(
					booking
						.filter(id.eq_any(ids))
						.filter(status.eq(BookingStatus::Confirmed)),
				)
				.set((status.eq(BookingStatus::Completed), updated_at.eq(now)))
				.execute(conn)
			})
			.await??;

		Ok(completed)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct NewBooking {
	pub seat_id:          i32,
	pub user_id:          i32,
	pub time_slot_id:     Option<i32>,
	pub day:              NaiveDate,
	pub start_time:       NaiveTime,
	pub end_time:         NaiveTime,
	pub duration_minutes: i32,
	pub notes:            Option<String>,
}

impl NewBooking {
	/// Insert this [`NewBooking`], re-running the overlap check inside a
	/// serializable transaction
	///
	/// The conflict check and the insert must be atomic with respect to
	/// each other or two racing requests can both pass validation and
	/// double-book the seat. A lost serialization race maps to
	/// [`BookingError::Conflict`] just like a pre-existing overlap.
	#[instrument(skip(conn))]
	pub async fn insert_guarded(self, conn: &DbConn) -> Result<Booking, Error> {
		let (s_id, date, start, end) =
			(self.seat_id, self.day, self.start_time, self.end_time);

		let created = conn
			.interact(move |conn| {
				conn.build_transaction().serializable().run(
					|conn| -> Result<Booking, Error> {
						use crate::schema::booking::dsl::*;

						let clashes: i64 = booking
							.filter(seat_id.eq(s_id))
							.filter(day.eq(date))
							.filter(status.eq_any([
								BookingStatus::Confirmed,
								BookingStatus::Completed,
							]))
							.filter(start_time.lt(end))
							.filter(end_time.gt(start))
							.count()
							.get_result(conn)?;

						if clashes > 0 {
							return Err(BookingError::Conflict.into());
						}

						let created = diesel::insert_into(booking)
							.values(self)
							.returning(Booking::as_returning())
							.get_result(conn)?;

						Ok(created)
					},
				)
			})
			.await??;

		info!("created booking {} for seat {s_id} on {date}", created.id);

		Ok(created)
	}
}
