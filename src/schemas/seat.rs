use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::models::{NewSeat, Seat, SeatCategory};
use crate::scan;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatResponse {
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

impl From<Seat> for SeatResponse {
	fn from(value: Seat) -> Self {
		Self {
			id:          value.id,
			location_id: value.location_id,
			number:      value.number,
			seat_row:    value.seat_row,
			seat_column: value.seat_column,
			category:    value.category,
			is_active:   value.is_active,
			facilities:  value.facilities,
			notes:       value.notes,
			code_url:    value.code_url,
			created_at:  value.created_at,
			updated_at:  value.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeatRequest {
	#[validate(range(min = 1))]
	pub number:      i32,
	#[validate(range(min = 1))]
	pub seat_row:    i32,
	#[validate(range(min = 1))]
	pub seat_column: i32,
	#[serde(default)]
	pub category:    SeatCategory,
	#[serde(default)]
	pub facilities:  Vec<String>,
	#[validate(length(max = 512))]
	pub notes:       Option<String>,
}

impl CreateSeatRequest {
	/// Build the insertable seat, baking the stable deep link into its
	/// scannable code
	#[must_use]
	pub fn to_insertable(self, location_id: i32, base_url: &str) -> NewSeat {
		let code_url = scan::seat_deep_link(base_url, location_id, self.number);

		NewSeat {
			location_id,
			number: self.number,
			seat_row: self.seat_row,
			seat_column: self.seat_column,
			category: self.category,
			facilities: self.facilities,
			notes: self.notes,
			code_url,
		}
	}
}
