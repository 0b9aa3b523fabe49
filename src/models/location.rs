use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::DbConn;
use crate::error::Error;
use crate::schema::location;

/// A physical study center owning seats and time slots
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = location)]
#[diesel(check_for_backend(Pg))]
pub struct Location {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl Location {
	/// Get a [`Location`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(l_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let loc = conn
			.interact(move |conn| {
				use crate::schema::location::dsl::*;

				location.find(l_id).select(Self::as_select()).get_result(conn)
			})
			.await?
			.map_err(|e| match e {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("no location with id {l_id}"))
				},
				e => e.into(),
			})?;

		Ok(loc)
	}

	/// Get all [`Location`]s
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let locs = conn
			.interact(|conn| {
				use crate::schema::location::dsl::*;

				location.select(Self::as_select()).order(id.asc()).load(conn)
			})
			.await??;

		Ok(locs)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = location)]
#[diesel(check_for_backend(Pg))]
pub struct NewLocation {
	pub name:        String,
	pub description: Option<String>,
}

impl NewLocation {
	/// Insert this [`NewLocation`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Location, Error> {
		let loc = conn
			.interact(|conn| {
				use self::location::dsl::*;

				diesel::insert_into(location)
					.values(self)
					.returning(Location::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created location {}", loc.id);

		Ok(loc)
	}
}
