use seatwise::clock::Clock;

mod common;

use common::{date, datetime, time};

const IST_OFFSET: i32 = 330;

#[test]
fn frozen_clock_reports_the_frozen_instant() {
	let now = datetime(2025, 6, 1, "09:30");
	let clock = Clock::frozen(IST_OFFSET, now);

	assert_eq!(clock.now(), now);
	assert_eq!(clock.today(), date(2025, 6, 1));
	assert_eq!(clock.current_time(), time("09:30"));
}

#[test]
fn today_truncates_to_midnight() {
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "23:59"));

	assert_eq!(
		clock.today().and_time(time("00:00")),
		datetime(2025, 6, 1, "00:00")
	);
}

#[test]
fn expiry_respects_the_buffer() {
	let day = date(2025, 6, 1);
	let end = time("10:00");

	let before = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "10:04"));
	assert!(!before.is_expired(end, day, 5));

	// Exactly at the deadline still counts as live
	let at = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "10:05"));
	assert!(!at.is_expired(end, day, 5));

	let after = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "10:06"));
	assert!(after.is_expired(end, day, 5));
}

#[test]
fn expiry_crosses_days() {
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 2, "00:01"));

	assert!(clock.is_expired(time("23:00"), date(2025, 6, 1), 5));
	assert!(!clock.is_expired(time("09:00"), date(2025, 6, 2), 5));
}

#[test]
fn system_clock_is_usable() {
	// Smoke check only: the offset clock must produce a civil datetime
	let clock = Clock::with_offset_minutes(IST_OFFSET);

	assert_eq!(clock.now().date(), clock.today());
}
