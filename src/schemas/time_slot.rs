use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::error::Error;
use crate::interval;
use crate::models::{NewTimeSlot, TimeSlot, WEEKDAY_NAMES};

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
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

impl From<TimeSlot> for TimeSlotResponse {
	fn from(value: TimeSlot) -> Self {
		Self {
			id:                  value.id,
			location_id:         value.location_id,
			name:                value.name,
			start_time:          value.start_time,
			end_time:            value.end_time,
			days_of_week:        value.days_of_week,
			max_booking_minutes: value.max_booking_minutes,
			is_active:           value.is_active,
			created_at:          value.created_at,
			updated_at:          value.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
	#[validate(length(min = 1, max = 128))]
	pub name:                String,
	pub start_time:          String,
	pub end_time:            String,
	pub days_of_week:        Vec<String>,
	#[validate(range(min = 1))]
	pub max_booking_minutes: i32,
}

impl CreateTimeSlotRequest {
	/// Build the insertable time slot
	///
	/// # Errors
	/// Fails on malformed times, an inverted range, or unknown weekday
	/// names.
	pub fn to_insertable(
		self,
		location_id: i32,
	) -> Result<NewTimeSlot, Error> {
		let start_time = interval::parse_time(&self.start_time)?;
		let end_time = interval::parse_time(&self.end_time)?;

		if interval::duration_minutes(start_time, end_time) <= 0 {
			return Err(crate::error::BookingError::InvalidTimeRange(
				"the end time must be after the start time".to_string(),
			)
			.into());
		}

		let days_of_week: Vec<String> =
			self.days_of_week.iter().map(|d| d.to_lowercase()).collect();

		for day in &days_of_week {
			if !WEEKDAY_NAMES.contains(&day.as_str()) {
				return Err(Error::ValidationError(format!(
					"'{day}' is not a weekday name"
				)));
			}
		}

		Ok(NewTimeSlot {
			location_id,
			name: self.name,
			start_time,
			end_time,
			days_of_week,
			max_booking_minutes: self.max_booking_minutes,
		})
	}
}
