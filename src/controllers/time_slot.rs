use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::DbPool;
use crate::error::Error;
use crate::models::{Location, TimeSlot};
use crate::schemas::time_slot::{CreateTimeSlotRequest, TimeSlotResponse};

#[instrument(skip(pool))]
pub async fn create_location_time_slot(
	State(pool): State<DbPool>,
	Path(l_id): Path<i32>,
	Json(request): Json<CreateTimeSlotRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let location = Location::get_by_id(l_id, &conn).await?;

	let slot = request.to_insertable(location.id)?.insert(&conn).await?;
	let response = TimeSlotResponse::from(slot);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_location_time_slots(
	State(pool): State<DbPool>,
	Path(l_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let slots = TimeSlot::for_location(l_id, &conn).await?;
	let response: Vec<TimeSlotResponse> =
		slots.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn activate_time_slot(
	State(pool): State<DbPool>,
	Path(t_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let slot = TimeSlot::set_active(t_id, true, &conn).await?;

	Ok((StatusCode::OK, Json(TimeSlotResponse::from(slot))))
}

#[instrument(skip(pool))]
pub async fn deactivate_time_slot(
	State(pool): State<DbPool>,
	Path(t_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let slot = TimeSlot::set_active(t_id, false, &conn).await?;

	Ok((StatusCode::OK, Json(TimeSlotResponse::from(slot))))
}
