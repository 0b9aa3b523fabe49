use seatwise::BookingError;
use seatwise::interval::{
	duration_minutes,
	minutes_to_time,
	overlaps,
	parse_time,
	time_to_minutes,
};

mod common;

use common::time;

#[test]
fn converts_times_to_minutes() {
	assert_eq!(time_to_minutes("00:00").unwrap(), 0);
	assert_eq!(time_to_minutes("09:30").unwrap(), 570);
	assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
}

#[test]
fn converts_minutes_to_times() {
	assert_eq!(minutes_to_time(0), "00:00");
	assert_eq!(minutes_to_time(570), "09:30");
	assert_eq!(minutes_to_time(1439), "23:59");
}

#[test]
fn minutes_roundtrip() {
	for minutes in [0, 1, 59, 60, 719, 720, 1439] {
		assert_eq!(
			time_to_minutes(&minutes_to_time(minutes)).unwrap(),
			minutes
		);
	}
}

#[test]
fn rejects_malformed_times() {
	for raw in [
		"", "9", "24:00", "12:60", "ab:cd", "12-30", "-1:30", "9:30", "09:5",
		"+9:05", " 9:05", "09:05 ",
	] {
		assert!(
			matches!(
				time_to_minutes(raw),
				Err(BookingError::InvalidTimeRange(_))
			),
			"accepted {raw:?}"
		);
	}
}

#[test]
fn parses_wall_clock_times() {
	assert_eq!(parse_time("09:30").unwrap(), time("09:30"));
	assert!(parse_time("25:00").is_err());
}

#[test]
fn touching_intervals_do_not_overlap() {
	assert!(!overlaps(
		time("09:00"),
		time("10:00"),
		time("10:00"),
		time("11:00")
	));
}

#[test]
fn one_minute_spill_overlaps() {
	assert!(overlaps(
		time("09:00"),
		time("10:01"),
		time("10:00"),
		time("11:00")
	));
}

#[test]
fn containment_overlaps() {
	assert!(overlaps(
		time("09:00"),
		time("12:00"),
		time("10:00"),
		time("11:00")
	));
	assert!(overlaps(
		time("10:00"),
		time("11:00"),
		time("09:00"),
		time("12:00")
	));
}

#[test]
fn durations() {
	assert_eq!(duration_minutes(time("09:00"), time("11:00")), 120);
	assert_eq!(duration_minutes(time("09:00"), time("09:00")), 0);
	assert_eq!(duration_minutes(time("11:00"), time("09:00")), -120);
}
