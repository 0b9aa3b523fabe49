use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::SeatCategory;
use crate::DbConn;
use crate::error::Error;
use crate::schema::seat;

/// A bookable seat in a study center
///
/// Seats are soft-disabled through `is_active` and never hard-deleted
/// while bookings reference them.
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = seat)]
#[diesel(check_for_backend(Pg))]
pub struct Seat {
	pub id:          i32,
	pub location_id: i32,
	pub number:      i32,
	pub seat_row:    i32,
	pub seat_column: i32,
	pub category:    SeatCategory,
	pub is_active:   bool,
	pub facilities:  Vec<String>,
	pub notes:       Option<String>,
	pub code_url:    String,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl Seat {
	/// Get a [`Seat`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(s_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let seat = conn
			.interact(move |conn| {
				use crate::schema::seat::dsl::*;

				seat.find(s_id).select(Self::as_select()).get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("no seat with id {s_id}"))
				},
				e => e.into(),
			})?;

		Ok(seat)
	}

	/// Get a [`Seat`] by its location and seat number, as encoded in
	/// scannable deep links
	#[instrument(skip(conn))]
	pub async fn get_by_location_and_number(
		l_id: i32,
		seat_number: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let seat = conn
			.interact(move |conn| {
				use crate::schema::seat::dsl::*;

				seat.filter(location_id.eq(l_id))
					.filter(number.eq(seat_number))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => Error::NotFound(format!(
					"no seat {seat_number} at location {l_id}"
				)),
				e => e.into(),
			})?;

		Ok(seat)
	}

	/// Get all the seats of a location
	#[instrument(skip(conn))]
	pub async fn for_location(
		l_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let seats = conn
			.interact(move |conn| {
				use crate::schema::seat::dsl::*;

				seat.filter(location_id.eq(l_id))
					.select(Self::as_select())
					.order(number.asc())
					.load(conn)
			})
			.await??;

		Ok(seats)
	}

	/// Soft-enable or soft-disable a [`Seat`]
	#[instrument(skip(conn))]
	pub async fn set_active(
		s_id: i32,
		active: bool,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let seat = conn
			.interact(move |conn| {
				use crate::schema::seat::dsl::*;

				diesel::update(seat.find(s_id))
					.set(is_active.eq(active))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("no seat with id {s_id}"))
				},
				e => e.into(),
			})?;

		info!("set seat {s_id} active={active}");

		Ok(seat)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = seat)]
#[diesel(check_for_backend(Pg))]
pub struct NewSeat {
	pub location_id: i32,
	pub number:      i32,
	pub seat_row:    i32,
	pub seat_column: i32,
	pub category:    SeatCategory,
	pub facilities:  Vec<String>,
	pub notes:       Option<String>,
	pub code_url:    String,
}

impl NewSeat {
	/// Insert a batch of [`NewSeat`]s for a location
	///
	/// Administrators create seats in bulk; the unique constraints on
	/// (location, row, column) and (location, number) reject collisions.
	#[instrument(skip(new_seats, conn))]
	pub async fn bulk_insert(
		new_seats: Vec<Self>,
		conn: &DbConn,
	) -> Result<Vec<Seat>, Error> {
		let seats = conn
			.interact(|conn| {
				use self::seat::dsl::*;

				diesel::insert_into(seat)
					.values(new_seats)
					.returning(Seat::as_returning())
					.get_results(conn)
			})
			.await??;

		info!("created {} seats", seats.len());

		Ok(seats)
	}
}
