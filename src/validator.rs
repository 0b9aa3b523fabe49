//! Booking admission control
//!
//! Pure checks over prefetched rows, run in a fixed order and failing
//! fast with a specific [`BookingError`] kind. The overlap check is
//! additionally re-run inside the serializable insert transaction
//! ([`crate::models::NewBooking::insert_guarded`]); the version here
//! exists so validation failures keep their documented ordering.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};

use crate::clock::Clock;
use crate::error::{BookingError, Error, QuotaScope};
use crate::interval;
use crate::models::{Booking, BookingStatus, Seat, TimeSlot, WEEKDAY_NAMES};

/// The tunable limits admission control runs against, sourced from
/// [`Config`](crate::Config) in production.
#[derive(Clone, Copy, Debug)]
pub struct BookingRules {
	/// How many days ahead of today a booking may be dated
	pub advance_booking_days:       i64,
	/// Duration ceiling for bookings made without a time slot
	pub default_max_minutes:        i32,
	/// Confirmed/completed bookings one user may hold per date
	pub daily_quota:                i64,
	/// Confirmed bookings one user may hold from today forward
	pub standing_quota:             i64,
	/// Minutes before start after which self-service cancel is refused
	pub cancellation_cutoff_minutes: i64,
}

impl Default for BookingRules {
	fn default() -> Self {
		Self {
			advance_booking_days:        30,
			default_max_minutes:         480,
			daily_quota:                 3,
			standing_quota:              10,
			cancellation_cutoff_minutes: 30,
		}
	}
}

/// The two check-in windows in use
///
/// The windows differ on purpose and are kept as distinct named
/// policies: assisted check-in tolerates being a little early or late,
/// self check-in opens half an hour before start and never closes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckInPolicy {
	/// Admin-assisted: within 15 minutes either side of start
	Admin,
	/// Self-service: from 30 minutes before start, same day only
	SelfService,
}

/// Check that the target seat is active.
pub fn check_seat(seat: &Seat) -> Result<(), Error> {
	if !seat.is_active {
		return Err(BookingError::InactiveResource(format!(
			"seat {} is not active",
			seat.number
		))
		.into());
	}

	Ok(())
}

/// Check that the chosen time slot is active.
pub fn check_time_slot(slot: &TimeSlot) -> Result<(), Error> {
	if !slot.is_active {
		return Err(BookingError::InactiveResource(format!(
			"time slot '{}' is not active",
			slot.name
		))
		.into());
	}

	Ok(())
}

/// Check that the booking date is neither past nor beyond the advance
/// ceiling.
pub fn check_date(
	date: NaiveDate,
	today: NaiveDate,
	advance_booking_days: i64,
) -> Result<(), Error> {
	let latest = today + TimeDelta::days(advance_booking_days);

	if date < today || date > latest {
		return Err(BookingError::OutOfBookingWindow {
			earliest: today,
			latest,
		}
		.into());
	}

	Ok(())
}

/// Check that the interval is strictly positive, returning its length
/// in minutes.
pub fn check_duration(
	start: NaiveTime,
	end: NaiveTime,
) -> Result<i32, Error> {
	let minutes = interval::duration_minutes(start, end);

	if minutes <= 0 {
		return Err(BookingError::InvalidTimeRange(
			"the end time must be after the start time".to_string(),
		)
		.into());
	}

	Ok(minutes)
}

/// Check a slot-bound booking against the slot's duration ceiling,
/// hours and weekdays.
pub fn check_slot_bounds(
	slot: &TimeSlot,
	date: NaiveDate,
	start: NaiveTime,
	end: NaiveTime,
	duration_minutes: i32,
) -> Result<(), Error> {
	if duration_minutes > slot.max_booking_minutes {
		return Err(BookingError::DurationExceeded {
			max_minutes: slot.max_booking_minutes,
		}
		.into());
	}

	if start < slot.start_time || end > slot.end_time {
		return Err(BookingError::OutsideAvailabilityWindow {
			start: slot.start_time,
			end:   slot.end_time,
		}
		.into());
	}

	let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize];
	if !slot.days_of_week.iter().any(|d| d == weekday) {
		return Err(BookingError::OutsideAvailabilityWindow {
			start: slot.start_time,
			end:   slot.end_time,
		}
		.into());
	}

	Ok(())
}

/// Check a slot-less booking against the default duration ceiling.
pub fn check_default_duration(
	duration_minutes: i32,
	default_max_minutes: i32,
) -> Result<(), Error> {
	if duration_minutes > default_max_minutes {
		return Err(BookingError::DurationExceeded {
			max_minutes: default_max_minutes,
		}
		.into());
	}

	Ok(())
}

/// Check the requested interval against the existing bookings of the
/// seat-day; only confirmed/completed rows occupy their interval.
pub fn check_conflicts(
	existing: &[Booking],
	start: NaiveTime,
	end: NaiveTime,
) -> Result<(), Error> {
	let clash = existing.iter().any(|b| {
		b.status.occupies_seat()
			&& interval::overlaps(b.start_time, b.end_time, start, end)
	});

	if clash {
		return Err(BookingError::Conflict.into());
	}

	Ok(())
}

/// Check both per-user quotas from their current counts.
pub fn check_quotas(
	daily_count: i64,
	standing_count: i64,
	rules: &BookingRules,
) -> Result<(), Error> {
	if daily_count >= rules.daily_quota {
		return Err(BookingError::QuotaExceeded {
			scope: QuotaScope::Daily,
			limit: rules.daily_quota,
		}
		.into());
	}

	if standing_count >= rules.standing_quota {
		return Err(BookingError::QuotaExceeded {
			scope: QuotaScope::Standing,
			limit: rules.standing_quota,
		}
		.into());
	}

	Ok(())
}

/// Check that a cancellation request is admissible
///
/// Requires ownership or privilege, a non-terminal status, and (for
/// non-privileged requesters) being more than the cutoff ahead of
/// start.
pub fn check_cancellation(
	booking: &Booking,
	requester_id: i32,
	privileged: bool,
	clock: &Clock,
	cutoff_minutes: i64,
) -> Result<(), Error> {
	if booking.user_id != requester_id && !privileged {
		return Err(Error::Unauthorized);
	}

	if booking.status != BookingStatus::Confirmed {
		return Err(BookingError::IllegalStateTransition(format!(
			"a {} booking cannot be cancelled",
			booking.status
		))
		.into());
	}

	if !privileged {
		let cutoff = booking.day.and_time(booking.start_time)
			- TimeDelta::minutes(cutoff_minutes);

		if clock.now() > cutoff {
			return Err(BookingError::IllegalStateTransition(format!(
				"bookings can only be cancelled up to {cutoff_minutes} \
				 minutes before they start"
			))
			.into());
		}
	}

	Ok(())
}

/// Check that a check-in is admissible under the given policy.
pub fn check_check_in(
	booking: &Booking,
	policy: CheckInPolicy,
	clock: &Clock,
) -> Result<(), Error> {
	if booking.status != BookingStatus::Confirmed {
		return Err(BookingError::IllegalStateTransition(
			"only confirmed bookings can be checked in".to_string(),
		)
		.into());
	}

	if booking.checked_in {
		return Err(BookingError::IllegalStateTransition(
			"the booking is already checked in".to_string(),
		)
		.into());
	}

	let now = clock.now();
	let starts_at = booking.day.and_time(booking.start_time);

	let in_window = match policy {
		CheckInPolicy::Admin => {
			let window = TimeDelta::minutes(15);

			now >= starts_at - window && now <= starts_at + window
		},
		CheckInPolicy::SelfService => {
			booking.day == clock.today()
				&& now >= starts_at - TimeDelta::minutes(30)
		},
	};

	if !in_window {
		return Err(BookingError::IllegalStateTransition(
			"the booking cannot be checked in at this time".to_string(),
		)
		.into());
	}

	Ok(())
}

/// Check that a check-out is admissible.
pub fn check_check_out(booking: &Booking) -> Result<(), Error> {
	if booking.status != BookingStatus::Confirmed {
		return Err(BookingError::IllegalStateTransition(
			"only confirmed bookings can be checked out".to_string(),
		)
		.into());
	}

	if !booking.checked_in {
		return Err(BookingError::IllegalStateTransition(
			"the booking was never checked in".to_string(),
		)
		.into());
	}

	if booking.checked_out {
		return Err(BookingError::IllegalStateTransition(
			"the booking is already checked out".to_string(),
		)
		.into());
	}

	Ok(())
}
