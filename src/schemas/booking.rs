use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::availability::{Availability, FreeSlot, TemporalStatus};
use crate::models::{Booking, BookingStatus};
use crate::validator::CheckInPolicy;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
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

impl From<Booking> for BookingResponse {
	fn from(value: Booking) -> Self {
		Self {
			id:               value.id,
			seat_id:          value.seat_id,
			user_id:          value.user_id,
			time_slot_id:     value.time_slot_id,
			day:              value.day,
			start_time:       value.start_time,
			end_time:         value.end_time,
			duration_minutes: value.duration_minutes,
			status:           value.status,
			checked_in:       value.checked_in,
			checked_in_at:    value.checked_in_at,
			checked_out:      value.checked_out,
			checked_out_at:   value.checked_out_at,
			cancelled_at:     value.cancelled_at,
			cancel_reason:    value.cancel_reason,
			notes:            value.notes,
			created_at:       value.created_at,
			updated_at:       value.updated_at,
		}
	}
}

/// A booking together with its clock-derived temporal status.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedBookingResponse {
	pub temporal_status: TemporalStatus,
	#[serde(flatten)]
	pub booking:         BookingResponse,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub is_currently_booked: bool,
	pub active_booking:      Option<BookingResponse>,
	pub all_bookings:        Vec<TimedBookingResponse>,
	pub available_slots:     Vec<FreeSlot>,
}

impl From<Availability> for AvailabilityResponse {
	fn from(value: Availability) -> Self {
		Self {
			is_currently_booked: value.is_currently_booked,
			active_booking:      value.active_booking.map(Into::into),
			all_bookings:        value
				.bookings
				.into_iter()
				.map(|(booking, temporal_status)| TimedBookingResponse {
					temporal_status,
					booking: booking.into(),
				})
				.collect(),
			available_slots:     value.available_slots,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct AvailabilityQuery {
	pub date: NaiveDate,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub seat_id:      i32,
	pub time_slot_id: Option<i32>,
	pub day:          NaiveDate,
	pub start_time:   String,
	pub end_time:     String,
	pub user_id:      i32,
	#[validate(length(max = 512))]
	pub notes:        Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
	pub requester_id:            i32,
	#[serde(default)]
	pub requester_is_privileged: bool,
	#[validate(length(max = 512))]
	pub reason:                  Option<String>,
}

/// Which check-in window applies to a request
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInMode {
	Admin,
	#[serde(rename = "self")]
	SelfService,
}

impl From<CheckInMode> for CheckInPolicy {
	fn from(value: CheckInMode) -> Self {
		match value {
			CheckInMode::Admin => Self::Admin,
			CheckInMode::SelfService => Self::SelfService,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
	pub mode:     CheckInMode,
	pub actor_id: i32,
}
