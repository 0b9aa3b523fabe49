use seatwise::clock::Clock;
use seatwise::error::{BookingError, Error, QuotaScope};
use seatwise::models::BookingStatus;
use seatwise::validator::{
	BookingRules,
	CheckInPolicy,
	check_cancellation,
	check_check_in,
	check_check_out,
	check_conflicts,
	check_date,
	check_default_duration,
	check_duration,
	check_quotas,
	check_seat,
	check_slot_bounds,
	check_time_slot,
};

mod common;

use common::{booking, date, datetime, seat, time, time_slot};

const IST_OFFSET: i32 = 330;

#[test]
fn inactive_resources_are_refused() {
	assert!(check_seat(&seat(1, true)).is_ok());
	assert!(matches!(
		check_seat(&seat(1, false)),
		Err(Error::BookingError(BookingError::InactiveResource(_)))
	));

	let mut slot = time_slot("09:00", "18:00", &["sunday"], 240);
	assert!(check_time_slot(&slot).is_ok());

	slot.is_active = false;
	assert!(matches!(
		check_time_slot(&slot),
		Err(Error::BookingError(BookingError::InactiveResource(_)))
	));
}

#[test]
fn dates_must_fall_in_the_booking_window() {
	let today = date(2025, 6, 1);

	assert!(check_date(today, today, 30).is_ok());
	assert!(check_date(date(2025, 7, 1), today, 30).is_ok());

	assert!(matches!(
		check_date(date(2025, 5, 31), today, 30),
		Err(Error::BookingError(BookingError::OutOfBookingWindow { .. }))
	));
	assert!(matches!(
		check_date(date(2025, 7, 2), today, 30),
		Err(Error::BookingError(BookingError::OutOfBookingWindow { .. }))
	));
}

#[test]
fn durations_must_be_positive() {
	assert_eq!(check_duration(time("09:00"), time("11:00")).unwrap(), 120);

	for (start, end) in [("09:00", "09:00"), ("11:00", "09:00")] {
		assert!(matches!(
			check_duration(time(start), time(end)),
			Err(Error::BookingError(BookingError::InvalidTimeRange(_)))
		));
	}
}

#[test]
fn slot_bounds_cap_the_duration() {
	// 2025-06-01 is a Sunday
	let slot = time_slot("09:00", "18:00", &["sunday"], 240);
	let day = date(2025, 6, 1);

	assert!(
		check_slot_bounds(&slot, day, time("09:00"), time("13:00"), 240).is_ok()
	);

	let too_long =
		check_slot_bounds(&slot, day, time("09:00"), time("14:00"), 300);
	assert!(matches!(
		too_long,
		Err(Error::BookingError(BookingError::DurationExceeded {
			max_minutes: 240
		}))
	));
}

#[test]
fn slot_bounds_enforce_the_hours() {
	let slot = time_slot("09:00", "18:00", &["sunday"], 240);
	let day = date(2025, 6, 1);

	for (start, end) in [("08:30", "10:00"), ("17:00", "18:30")] {
		assert!(matches!(
			check_slot_bounds(&slot, day, time(start), time(end), 90),
			Err(Error::BookingError(
				BookingError::OutsideAvailabilityWindow { .. }
			))
		));
	}
}

#[test]
fn slot_bounds_enforce_the_weekdays() {
	let slot = time_slot("09:00", "18:00", &["monday", "friday"], 240);

	// 2025-06-01 is a Sunday, 2025-06-02 a Monday
	assert!(matches!(
		check_slot_bounds(
			&slot,
			date(2025, 6, 1),
			time("09:00"),
			time("10:00"),
			60
		),
		Err(Error::BookingError(
			BookingError::OutsideAvailabilityWindow { .. }
		))
	));
	assert!(
		check_slot_bounds(
			&slot,
			date(2025, 6, 2),
			time("09:00"),
			time("10:00"),
			60
		)
		.is_ok()
	);
}

#[test]
fn slotless_bookings_use_the_default_cap() {
	assert!(check_default_duration(480, 480).is_ok());
	assert!(matches!(
		check_default_duration(481, 480),
		Err(Error::BookingError(BookingError::DurationExceeded {
			max_minutes: 480
		}))
	));
}

#[test]
fn overlapping_bookings_conflict() {
	let day = date(2025, 6, 1);
	let existing =
		vec![booking(1, 1, day, "09:00", "11:00", BookingStatus::Confirmed)];

	// Touching intervals are fine
	assert!(check_conflicts(&existing, time("11:00"), time("12:00")).is_ok());
	assert!(check_conflicts(&existing, time("08:00"), time("09:00")).is_ok());

	assert!(matches!(
		check_conflicts(&existing, time("10:30"), time("11:30")),
		Err(Error::BookingError(BookingError::Conflict))
	));
}

#[test]
fn cancelled_rows_do_not_conflict() {
	let day = date(2025, 6, 1);
	let existing =
		vec![booking(1, 1, day, "09:00", "11:00", BookingStatus::Cancelled)];

	assert!(check_conflicts(&existing, time("09:30"), time("10:30")).is_ok());
}

#[test]
fn quotas_bound_both_scopes() {
	let rules = BookingRules::default();

	assert!(check_quotas(2, 9, &rules).is_ok());

	assert!(matches!(
		check_quotas(3, 0, &rules),
		Err(Error::BookingError(BookingError::QuotaExceeded {
			scope: QuotaScope::Daily,
			limit: 3,
		}))
	));
	assert!(matches!(
		check_quotas(0, 10, &rules),
		Err(Error::BookingError(BookingError::QuotaExceeded {
			scope: QuotaScope::Standing,
			limit: 10,
		}))
	));
}

#[test]
fn only_the_owner_or_a_privileged_requester_may_cancel() {
	let day = date(2025, 6, 2);
	let b = booking(1, 7, day, "09:00", "11:00", BookingStatus::Confirmed);
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "12:00"));

	assert!(check_cancellation(&b, 7, false, &clock, 30).is_ok());
	assert!(check_cancellation(&b, 99, true, &clock, 30).is_ok());

	assert!(matches!(
		check_cancellation(&b, 99, false, &clock, 30),
		Err(Error::Unauthorized)
	));
}

#[test]
fn terminal_bookings_cannot_be_cancelled() {
	let day = date(2025, 6, 2);
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "12:00"));

	for status in [
		BookingStatus::Cancelled,
		BookingStatus::Completed,
		BookingStatus::NoShow,
	] {
		let b = booking(1, 7, day, "09:00", "11:00", status);

		// Privilege does not reopen a terminal booking
		assert!(matches!(
			check_cancellation(&b, 7, true, &clock, 30),
			Err(Error::BookingError(
				BookingError::IllegalStateTransition(_)
			))
		));
	}
}

#[test]
fn the_cancellation_cutoff_only_binds_unprivileged_requesters() {
	let day = date(2025, 6, 1);
	let b = booking(1, 7, day, "09:00", "11:00", BookingStatus::Confirmed);

	// Ten minutes before start: past the 30-minute cutoff
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "08:50"));

	assert!(matches!(
		check_cancellation(&b, 7, false, &clock, 30),
		Err(Error::BookingError(BookingError::IllegalStateTransition(_)))
	));
	assert!(check_cancellation(&b, 7, true, &clock, 30).is_ok());

	// Exactly at the cutoff is still allowed
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "08:30"));
	assert!(check_cancellation(&b, 7, false, &clock, 30).is_ok());
}

#[test]
fn assisted_check_in_opens_fifteen_minutes_either_side() {
	let day = date(2025, 6, 1);
	let b = booking(1, 7, day, "09:00", "11:00", BookingStatus::Confirmed);

	for ok in ["08:45", "09:00", "09:15"] {
		let clock = Clock::frozen(IST_OFFSET, day.and_time(time(ok)));
		assert!(
			check_check_in(&b, CheckInPolicy::Admin, &clock).is_ok(),
			"refused at {ok}"
		);
	}

	for late in ["08:44", "09:16"] {
		let clock = Clock::frozen(IST_OFFSET, day.and_time(time(late)));
		assert!(
			matches!(
				check_check_in(&b, CheckInPolicy::Admin, &clock),
				Err(Error::BookingError(
					BookingError::IllegalStateTransition(_)
				))
			),
			"accepted at {late}"
		);
	}
}

#[test]
fn self_check_in_opens_early_and_never_closes_within_the_day() {
	let day = date(2025, 6, 1);
	let b = booking(1, 7, day, "09:00", "11:00", BookingStatus::Confirmed);

	for ok in ["08:30", "09:00", "14:00", "23:00"] {
		let clock = Clock::frozen(IST_OFFSET, day.and_time(time(ok)));
		assert!(
			check_check_in(&b, CheckInPolicy::SelfService, &clock).is_ok(),
			"refused at {ok}"
		);
	}

	let too_early = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "08:29"));
	assert!(
		check_check_in(&b, CheckInPolicy::SelfService, &too_early).is_err()
	);

	// Same wall-clock time the next day is a different civil date
	let next_day = Clock::frozen(IST_OFFSET, datetime(2025, 6, 2, "09:00"));
	assert!(check_check_in(&b, CheckInPolicy::SelfService, &next_day).is_err());
}

#[test]
fn check_in_requires_a_confirmed_unchecked_booking() {
	let day = date(2025, 6, 1);
	let clock = Clock::frozen(IST_OFFSET, datetime(2025, 6, 1, "09:00"));

	let cancelled = booking(1, 7, day, "09:00", "11:00", BookingStatus::Cancelled);
	assert!(check_check_in(&cancelled, CheckInPolicy::Admin, &clock).is_err());

	let mut again = booking(1, 7, day, "09:00", "11:00", BookingStatus::Confirmed);
	again.checked_in = true;
	assert!(check_check_in(&again, CheckInPolicy::Admin, &clock).is_err());
}

#[test]
fn check_out_requires_a_prior_check_in() {
	let day = date(2025, 6, 1);

	let mut b = booking(1, 7, day, "09:00", "11:00", BookingStatus::Confirmed);
	assert!(matches!(
		check_check_out(&b),
		Err(Error::BookingError(BookingError::IllegalStateTransition(_)))
	));

	b.checked_in = true;
	assert!(check_check_out(&b).is_ok());

	b.checked_out = true;
	assert!(check_check_out(&b).is_err());

	let completed =
		booking(2, 7, day, "09:00", "11:00", BookingStatus::Completed);
	assert!(check_check_out(&completed).is_err());
}
