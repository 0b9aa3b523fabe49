use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::models::{Location, NewLocation};

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl From<Location> for LocationResponse {
	fn from(value: Location) -> Self {
		Self {
			id:          value.id,
			name:        value.name,
			description: value.description,
			created_at:  value.created_at,
			updated_at:  value.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
	#[validate(length(min = 1, max = 128))]
	pub name:        String,
	#[validate(length(max = 512))]
	pub description: Option<String>,
}

impl CreateLocationRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewLocation {
		NewLocation { name: self.name, description: self.description }
	}
}
