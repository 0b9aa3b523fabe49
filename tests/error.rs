use diesel::result::{DatabaseErrorKind, Error as DieselError};
use seatwise::{BookingError, Error};

#[test]
fn a_lost_serialization_race_reports_a_conflict() {
	// Two racing create-booking transactions: the loser's serialization
	// failure must look exactly like a pre-existing overlap
	let err: Error = DieselError::DatabaseError(
		DatabaseErrorKind::SerializationFailure,
		Box::new("could not serialize access".to_string()),
	)
	.into();

	assert!(matches!(err, Error::BookingError(BookingError::Conflict)));
}

#[test]
fn missing_rows_report_not_found() {
	let err: Error = DieselError::NotFound.into();

	assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn unique_violations_report_a_duplicate() {
	let err: Error = DieselError::DatabaseError(
		DatabaseErrorKind::UniqueViolation,
		Box::new("duplicate key value".to_string()),
	)
	.into();

	assert!(matches!(err, Error::Duplicate(_)));
}

#[test]
fn unknown_database_errors_stay_opaque() {
	let err: Error = DieselError::RollbackTransaction.into();

	assert!(matches!(err, Error::InternalServerError));
}
