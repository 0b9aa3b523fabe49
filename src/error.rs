//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Any error produced by booking admission control or lifecycle rules
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Acting on another user's booking without privilege
	#[error("not allowed to act on this booking")]
	Unauthorized,
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

/// Which per-user booking quota was hit
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuotaScope {
	/// Confirmed or completed bookings on one date
	Daily,
	/// Confirmed bookings from today onwards
	Standing,
}

impl std::fmt::Display for QuotaScope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Daily => write!(f, "daily"),
			Self::Standing => write!(f, "standing"),
		}
	}
}

/// Any error produced by the booking validator or lifecycle
///
/// Every admission check fails with its own variant so API users get an
/// actionable reason rather than a generic failure.
#[derive(Debug, Error)]
pub enum BookingError {
	/// The requested interval collides with an existing booking
	///
	/// Losing a concurrent race for the same interval surfaces this same
	/// kind, so clients handle both uniformly.
	#[error("the seat is already booked for an overlapping interval")]
	Conflict,
	/// The booking is longer than the applicable duration ceiling
	#[error("the booking exceeds the maximum duration")]
	DurationExceeded { max_minutes: i32 },
	/// The target seat or time slot is soft-disabled
	#[error("{0} is not active")]
	InactiveResource(String),
	/// A lifecycle action was attempted from a state that forbids it
	#[error("{0}")]
	IllegalStateTransition(String),
	/// Malformed time string or non-positive interval
	#[error("{0}")]
	InvalidTimeRange(String),
	/// The booking date is in the past or beyond the advance ceiling
	#[error("the date is outside the bookable window")]
	OutOfBookingWindow { earliest: NaiveDate, latest: NaiveDate },
	/// The booking does not fit the chosen availability window
	#[error("the booking falls outside the availability window")]
	OutsideAvailabilityWindow { start: NaiveTime, end: NaiveTime },
	/// A per-user booking quota was reached
	#[error("the {scope} booking quota was reached")]
	QuotaExceeded { scope: QuotaScope, limit: i64 },
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever
	/// increase, an error code should never be reused once its assigned
	/// to avoid unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::InternalServerError => 2,
			Self::NotFound(_) => 3,
			Self::Unauthorized => 4,
			Self::ValidationError(_) => 5,
			Self::BookingError(e) => {
				match e {
					BookingError::Conflict => 10,
					BookingError::DurationExceeded { .. } => 11,
					BookingError::InactiveResource(_) => 12,
					BookingError::IllegalStateTransition(_) => 13,
					BookingError::InvalidTimeRange(_) => 14,
					BookingError::OutOfBookingWindow { .. } => 15,
					BookingError::OutsideAvailabilityWindow { .. } => 16,
					BookingError::QuotaExceeded { .. } => 17,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m) | Self::NotFound(m) | Self::ValidationError(m) => {
				Some(m.to_owned())
			},
			Self::BookingError(e) => {
				match e {
					BookingError::DurationExceeded { max_minutes } => Some(
						serde_json::json!({"maxMinutes": max_minutes}).to_string(),
					),
					BookingError::OutOfBookingWindow { earliest, latest } => {
						Some(
							serde_json::json!({
								"earliest": earliest,
								"latest": latest,
							})
							.to_string(),
						)
					},
					BookingError::OutsideAvailabilityWindow { start, end } => {
						Some(
							serde_json::json!({"start": start, "end": end})
								.to_string(),
						)
					},
					BookingError::QuotaExceeded { scope, limit } => Some(
						serde_json::json!({
							"scope": scope.to_string(),
							"limit": limit,
						})
						.to_string(),
					),
					BookingError::IllegalStateTransition(m)
					| BookingError::InactiveResource(m)
					| BookingError::InvalidTimeRange(m) => Some(m.to_owned()),
					BookingError::Conflict => None,
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::BookingError(BookingError::Conflict) | Self::Duplicate(_) => {
				StatusCode::CONFLICT
			},
			Self::BookingError(BookingError::IllegalStateTransition(_)) => {
				StatusCode::CONFLICT
			},
			Self::BookingError(_) => StatusCode::BAD_REQUEST,
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::Unauthorized => StatusCode::FORBIDDEN,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let constraint_name =
					info.constraint_name().unwrap_or("unknown constraint");

				Self::Duplicate(format!("'{constraint_name}' already exists"))
			},
			// A serializable create-booking transaction lost its race;
			// report it exactly like a pre-existing overlap
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::SerializationFailure,
				_,
			) => Self::BookingError(BookingError::Conflict),
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
