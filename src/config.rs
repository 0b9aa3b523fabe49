use std::time::Duration;

use deadpool_diesel::postgres::{Manager, Pool};

use crate::clock::Clock;
use crate::validator::BookingRules;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	/// Base URL baked into seat deep links
	pub base_url: String,

	/// Civil timezone offset east of UTC, in minutes (330 = UTC+5:30)
	pub timezone_offset_minutes: i32,

	pub advance_booking_days:        i64,
	pub default_max_booking_minutes: i32,
	pub daily_booking_quota:         i64,
	pub standing_booking_quota:      i64,
	pub cancellation_cutoff_minutes: i64,

	/// Grace buffer past end time before a booking counts as expired
	pub completion_buffer_minutes: i64,
	pub sweep_interval:            Duration,

	pub notification_queue_size: usize,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or<T: std::str::FromStr>(var: &str, default: T) -> T {
		std::env::var(var)
			.ok()
			.map(|v| {
				v.parse().unwrap_or_else(|_| panic!("{var} must be a number"))
			})
			.unwrap_or(default)
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if `DATABASE_URL` is missing or a tunable fails to parse
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let base_url = std::env::var("BASE_URL")
			.unwrap_or_else(|_| "https://app.seatwise.in".to_string());

		Self {
			database_url,
			base_url,
			timezone_offset_minutes: Self::get_env_var_or(
				"TIMEZONE_OFFSET_MINUTES",
				330,
			),
			advance_booking_days: Self::get_env_var_or(
				"ADVANCE_BOOKING_DAYS",
				30,
			),
			default_max_booking_minutes: Self::get_env_var_or(
				"DEFAULT_MAX_BOOKING_MINUTES",
				480,
			),
			daily_booking_quota: Self::get_env_var_or("DAILY_BOOKING_QUOTA", 3),
			standing_booking_quota: Self::get_env_var_or(
				"STANDING_BOOKING_QUOTA",
				10,
			),
			cancellation_cutoff_minutes: Self::get_env_var_or(
				"CANCELLATION_CUTOFF_MINUTES",
				30,
			),
			completion_buffer_minutes: Self::get_env_var_or(
				"COMPLETION_BUFFER_MINUTES",
				5,
			),
			sweep_interval: Duration::from_secs(Self::get_env_var_or(
				"SWEEP_INTERVAL_SECONDS",
				300,
			)),
			notification_queue_size: Self::get_env_var_or(
				"NOTIFICATION_QUEUE_SIZE",
				256,
			),
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// The civil clock for this deployment's timezone
	///
	/// # Panics
	/// Panics if the configured offset is not a valid timezone offset
	#[must_use]
	pub fn clock(&self) -> Clock {
		Clock::with_offset_minutes(self.timezone_offset_minutes)
	}

	/// The admission-control limits derived from this config
	#[must_use]
	pub fn booking_rules(&self) -> BookingRules {
		BookingRules {
			advance_booking_days:        self.advance_booking_days,
			default_max_minutes:         self.default_max_booking_minutes,
			daily_quota:                 self.daily_booking_quota,
			standing_quota:              self.standing_booking_quota,
			cancellation_cutoff_minutes: self.cancellation_cutoff_minutes,
		}
	}
}
