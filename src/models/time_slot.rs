use chrono::{NaiveDateTime, NaiveTime};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::DbConn;
use crate::error::Error;
use crate::schema::time_slot;

/// The 7 lowercase weekday names accepted in `days_of_week`, in
/// `chrono::Weekday` order.
pub const WEEKDAY_NAMES: [&str; 7] = [
	"monday",
	"tuesday",
	"wednesday",
	"thursday",
	"friday",
	"saturday",
	"sunday",
];

/// An optional availability window constraining booking requests
///
/// A booking may reference a time slot, in which case it must fit the
/// slot's hours, weekdays and duration ceiling. Bookings without a slot
/// fall back to the default duration cap instead.
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = time_slot)]
#[diesel(check_for_backend(Pg))]
pub struct TimeSlot {
	pub id:                  i32,
	pub location_id:         i32,
	pub name:                String,
	pub start_time:          NaiveTime,
	pub end_time:            NaiveTime,
	pub days_of_week:        Vec<String>,
	pub max_booking_minutes: i32,
	pub is_active:           bool,
	pub created_at:          NaiveDateTime,
	pub updated_at:          NaiveDateTime,
}

impl TimeSlot {
	/// Get a [`TimeSlot`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(t_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let slot = conn
			.interact(move |conn| {
				use crate::schema::time_slot::dsl::*;

				time_slot.find(t_id).select(Self::as_select()).get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("no time slot with id {t_id}"))
				},
				e => e.into(),
			})?;

		Ok(slot)
	}

	/// Get all the time slots of a location
	#[instrument(skip(conn))]
	pub async fn for_location(
		l_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let slots = conn
			.interact(move |conn| {
				use crate::schema::time_slot::dsl::*;

				time_slot
					.filter(location_id.eq(l_id))
					.select(Self::as_select())
					.order(start_time.asc())
					.load(conn)
			})
			.await??;

		Ok(slots)
	}

	/// Soft-enable or soft-disable a [`TimeSlot`]
	#[instrument(skip(conn))]
	pub async fn set_active(
		t_id: i32,
		active: bool,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let slot = conn
			.interact(move |conn| {
				use crate::schema::time_slot::dsl::*;

				diesel::update(time_slot.find(t_id))
					.set(is_active.eq(active))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("no time slot with id {t_id}"))
				},
				e => e.into(),
			})?;

		info!("set time slot {t_id} active={active}");

		Ok(slot)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = time_slot)]
#[diesel(check_for_backend(Pg))]
pub struct NewTimeSlot {
	pub location_id:         i32,
	pub name:                String,
	pub start_time:          NaiveTime,
	pub end_time:            NaiveTime,
	pub days_of_week:        Vec<String>,
	pub max_booking_minutes: i32,
}

impl NewTimeSlot {
	/// Insert this [`NewTimeSlot`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<TimeSlot, Error> {
		let slot = conn
			.interact(|conn| {
				use self::time_slot::dsl::*;

				diesel::insert_into(time_slot)
					.values(self)
					.returning(TimeSlot::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created time slot {}", slot.id);

		Ok(slot)
	}
}
