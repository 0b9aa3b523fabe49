//! Wall-clock interval arithmetic
//!
//! Every component that reasons about booking times goes through this
//! module so the minute math cannot drift between call sites.

use chrono::{NaiveTime, Timelike};

use crate::error::BookingError;

/// Minutes in a civil day, `"23:59"` inclusive.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Convert a strict `"HH:MM"` string to minutes since midnight.
///
/// # Errors
/// Fails with [`BookingError::InvalidTimeRange`] on malformed input or
/// out-of-range components.
pub fn time_to_minutes(time: &str) -> Result<i32, BookingError> {
	let malformed =
		|| BookingError::InvalidTimeRange(format!("malformed time '{time}'"));

	let (hours, minutes) = time.split_once(':').ok_or_else(malformed)?;

	// Exactly two digits on each side; no signs, spaces or shorthand
	if hours.len() != 2
		|| minutes.len() != 2
		|| !hours.bytes().all(|b| b.is_ascii_digit())
		|| !minutes.bytes().all(|b| b.is_ascii_digit())
	{
		return Err(malformed());
	}

	let hours: i32 = hours.parse().map_err(|_| malformed())?;
	let minutes: i32 = minutes.parse().map_err(|_| malformed())?;

	if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
		return Err(malformed());
	}

	Ok(hours * 60 + minutes)
}

/// Convert minutes since midnight back to a zero-padded `"HH:MM"` string.
#[must_use]
pub fn minutes_to_time(minutes: i32) -> String {
	format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a strict `"HH:MM"` string into a [`NaiveTime`].
///
/// # Errors
/// Fails with [`BookingError::InvalidTimeRange`] on malformed input.
pub fn parse_time(time: &str) -> Result<NaiveTime, BookingError> {
	let minutes = time_to_minutes(time)?;

	Ok(from_minutes(minutes))
}

/// Minutes since midnight for a [`NaiveTime`], seconds truncated.
#[must_use]
pub fn to_minutes(time: NaiveTime) -> i32 {
	#[allow(clippy::cast_possible_wrap)]
	let minutes = (time.hour() * 60 + time.minute()) as i32;

	minutes
}

/// The [`NaiveTime`] at the given number of minutes since midnight.
///
/// # Panics
/// Panics if `minutes` is outside `0..1440`.
#[must_use]
pub fn from_minutes(minutes: i32) -> NaiveTime {
	#[allow(clippy::cast_sign_loss)]
	NaiveTime::from_hms_opt(minutes as u32 / 60, minutes as u32 % 60, 0)
		.expect("minutes out of range for a civil day")
}

/// Half-open interval overlap test.
///
/// Touching intervals (`a_end == b_start`) do not overlap.
#[must_use]
pub fn overlaps(
	a_start: NaiveTime,
	a_end: NaiveTime,
	b_start: NaiveTime,
	b_end: NaiveTime,
) -> bool {
	a_start < b_end && a_end > b_start
}

/// Duration of `[start, end)` in minutes; non-positive results mean the
/// range is invalid and must be rejected by the caller.
#[must_use]
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i32 {
	to_minutes(end) - to_minutes(start)
}
