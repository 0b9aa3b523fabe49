//! Availability engine
//!
//! Derives the time-accurate picture of a seat's day from its stored
//! bookings: a *temporal* status per booking (independent of the stored
//! lifecycle status), the currently-active booking, and the free gaps a
//! client could still book.
//!
//! Everything here is pure over already-fetched rows; the sweep in
//! [`crate::scheduler`] is an optimization on top of this, not a
//! correctness dependency.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::interval;
use crate::models::{Booking, BookingStatus};

/// Gaps shorter than this are not worth offering as bookable windows.
pub const MIN_GAP_MINUTES: i32 = 30;

/// Where a booking's interval sits relative to the current time
///
/// Cancelled bookings are reported as `cancelled` and no-shows as
/// `expired` regardless of time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalStatus {
	Future,
	Active,
	Expired,
	Cancelled,
}

/// A free `[start, end)` window on a seat, in `"HH:MM"` strings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
	pub start_time: String,
	pub end_time:   String,
}

/// The availability picture of one seat on one civil date.
#[derive(Clone, Debug)]
pub struct Availability {
	pub is_currently_booked: bool,
	pub active_booking:      Option<Booking>,
	pub bookings:            Vec<(Booking, TemporalStatus)>,
	pub available_slots:     Vec<FreeSlot>,
}

/// Compute the temporal status of a booking from the clock alone.
#[must_use]
pub fn temporal_status(
	booking: &Booking,
	clock: &Clock,
	buffer_minutes: i64,
) -> TemporalStatus {
	match booking.status {
		BookingStatus::Cancelled => return TemporalStatus::Cancelled,
		// A no-show never occupies its interval again
		BookingStatus::NoShow => return TemporalStatus::Expired,
		_ => {},
	}

	let now = clock.now();
	let starts_at = booking.day.and_time(booking.start_time);

	if now < starts_at {
		TemporalStatus::Future
	} else if clock.is_expired(booking.end_time, booking.day, buffer_minutes) {
		TemporalStatus::Expired
	} else {
		TemporalStatus::Active
	}
}

/// Compute the free gaps between the occupying, non-expired bookings of
/// one seat-day
///
/// Walks from `00:00`, emitting a gap wherever the next booking starts
/// after the previous one ended, then a final gap up to `23:59`. Gaps
/// shorter than [`MIN_GAP_MINUTES`] are discarded.
#[must_use]
pub fn free_gaps(
	bookings: &[Booking],
	clock: &Clock,
	buffer_minutes: i64,
) -> Vec<FreeSlot> {
	let mut spans: Vec<(i32, i32)> = bookings
		.iter()
		.filter(|b| {
			b.status.occupies_seat()
				&& temporal_status(b, clock, buffer_minutes)
					!= TemporalStatus::Expired
		})
		.map(|b| {
			(interval::to_minutes(b.start_time), interval::to_minutes(b.end_time))
		})
		.collect();

	spans.sort_unstable();

	let mut gaps = Vec::new();
	let mut last_end = 0;

	for (start, end) in spans {
		if start > last_end {
			gaps.push((last_end, start));
		}

		last_end = last_end.max(end);
	}

	let end_of_day = interval::MINUTES_PER_DAY - 1;
	if end_of_day > last_end {
		gaps.push((last_end, end_of_day));
	}

	gaps.into_iter()
		.filter(|(start, end)| end - start >= MIN_GAP_MINUTES)
		.map(|(start, end)| FreeSlot {
			start_time: interval::minutes_to_time(start),
			end_time:   interval::minutes_to_time(end),
		})
		.collect()
}

impl Availability {
	/// Build the availability picture for one seat-day from its fetched
	/// bookings
	///
	/// A seat counts as currently booked exactly when some occupying
	/// booking is temporally `active`.
	#[must_use]
	pub fn build(
		bookings: Vec<Booking>,
		clock: &Clock,
		buffer_minutes: i64,
	) -> Self {
		let available_slots = free_gaps(&bookings, clock, buffer_minutes);

		let bookings: Vec<(Booking, TemporalStatus)> = bookings
			.into_iter()
			.map(|b| {
				let derived = temporal_status(&b, clock, buffer_minutes);
				(b, derived)
			})
			.collect();

		let active_booking = bookings
			.iter()
			.find(|(b, derived)| {
				b.status.occupies_seat() && *derived == TemporalStatus::Active
			})
			.map(|(b, _)| b.clone());

		Self {
			is_currently_booked: active_booking.is_some(),
			active_booking,
			bookings,
			available_slots,
		}
	}
}
