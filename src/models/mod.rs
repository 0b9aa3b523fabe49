use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

mod booking;
mod location;
mod seat;
mod time_slot;

pub use booking::{Booking, NewBooking};
pub use location::{Location, NewLocation};
pub use seat::{NewSeat, Seat};
pub use time_slot::{NewTimeSlot, TimeSlot, WEEKDAY_NAMES};

/// Lifecycle status of a [`Booking`]
///
/// `Confirmed` is the only non-terminal state; every transition out of
/// it is final.
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingStatus"]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
	#[default]
	Confirmed,
	Cancelled,
	Completed,
	NoShow,
}

impl std::fmt::Display for BookingStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Confirmed => write!(f, "confirmed"),
			Self::Cancelled => write!(f, "cancelled"),
			Self::Completed => write!(f, "completed"),
			Self::NoShow => write!(f, "no_show"),
		}
	}
}

impl BookingStatus {
	/// Whether bookings in this status occupy their interval for
	/// conflict and availability purposes
	#[must_use]
	pub fn occupies_seat(self) -> bool {
		matches!(self, Self::Confirmed | Self::Completed)
	}
}

/// Pricing/comfort tier of a [`Seat`]
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::SeatCategory"]
#[serde(rename_all = "snake_case")]
pub enum SeatCategory {
	#[default]
	Regular,
	Premium,
	Vip,
}
