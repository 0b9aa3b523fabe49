use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::DbPool;
use crate::error::Error;
use crate::models::Location;
use crate::schemas::location::{CreateLocationRequest, LocationResponse};

#[instrument(skip(pool))]
pub async fn create_location(
	State(pool): State<DbPool>,
	Json(request): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let location = request.to_insertable().insert(&conn).await?;
	let response = LocationResponse::from(location);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_locations(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let locations = Location::get_all(&conn).await?;
	let response: Vec<LocationResponse> =
		locations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_location(
	State(pool): State<DbPool>,
	Path(l_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let location = Location::get_by_id(l_id, &conn).await?;
	let response = LocationResponse::from(location);

	Ok((StatusCode::OK, Json(response)))
}
