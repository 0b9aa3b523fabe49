//! Fixed-offset civil clock
//!
//! All wall-clock decisions in the booking core are made against one
//! configured timezone offset. The clock is a value that gets injected
//! wherever "now" matters, so tests can freeze it.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// A clock pinned to a single fixed timezone offset.
#[derive(Clone, Debug)]
pub struct Clock {
	offset: FixedOffset,
	frozen: Option<NaiveDateTime>,
}

impl Clock {
	/// Create a clock for the given offset east of UTC, in minutes
	/// (e.g. `330` for UTC+5:30).
	///
	/// # Panics
	/// Panics if the offset is not a valid timezone offset.
	#[must_use]
	pub fn with_offset_minutes(minutes: i32) -> Self {
		let offset = FixedOffset::east_opt(minutes * 60)
			.expect("TIMEZONE_OFFSET_MINUTES IS NOT A VALID OFFSET");

		Self { offset, frozen: None }
	}

	/// Create a clock that always reports the given civil datetime.
	///
	/// # Panics
	/// Panics if the offset is not a valid timezone offset.
	#[must_use]
	pub fn frozen(offset_minutes: i32, now: NaiveDateTime) -> Self {
		let mut clock = Self::with_offset_minutes(offset_minutes);
		clock.frozen = Some(now);

		clock
	}

	/// The current civil datetime in the configured timezone.
	#[must_use]
	pub fn now(&self) -> NaiveDateTime {
		self.frozen
			.unwrap_or_else(|| Utc::now().with_timezone(&self.offset).naive_local())
	}

	/// The current civil date, time truncated to midnight.
	#[must_use]
	pub fn today(&self) -> NaiveDate { self.now().date() }

	/// The current civil wall-clock time.
	#[must_use]
	pub fn current_time(&self) -> NaiveTime { self.now().time() }

	/// Whether `end_time` on `date` lies more than `buffer_minutes` in
	/// the past.
	#[must_use]
	pub fn is_expired(
		&self,
		end_time: NaiveTime,
		date: NaiveDate,
		buffer_minutes: i64,
	) -> bool {
		let deadline = date.and_time(end_time) + TimeDelta::minutes(buffer_minutes);

		self.now() > deadline
	}
}
