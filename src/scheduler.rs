//! Reconciliation scheduler
//!
//! A background sweep that flips confirmed bookings to completed once
//! their end time plus a grace buffer has passed, so "currently booked"
//! queries stay cheap. The availability engine derives time-accurate
//! status on its own, which makes the sweep a cleanup pass rather than
//! a correctness dependency.
//!
//! The scheduler is an explicitly constructed component with start/stop
//! lifecycle methods and an injected [`Clock`], so tests can run
//! isolated instances.

use std::time::Duration;

use chrono::TimeDelta;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::DbPool;
use crate::clock::Clock;
use crate::error::Error;
use crate::models::Booking;

/// Recurring background reconciliation of booking state against the
/// clock.
pub struct ReconciliationScheduler {
	pool:           DbPool,
	clock:          Clock,
	sweep_interval: Duration,
	buffer_minutes: i64,
	shutdown:       watch::Sender<bool>,
}

/// Select the ids of bookings whose end time plus buffer has passed.
#[must_use]
pub fn expired_ids(
	bookings: &[Booking],
	clock: &Clock,
	buffer_minutes: i64,
) -> Vec<i32> {
	bookings
		.iter()
		.filter(|b| clock.is_expired(b.end_time, b.day, buffer_minutes))
		.map(|b| b.id)
		.collect()
}

impl ReconciliationScheduler {
	#[must_use]
	pub fn new(
		pool: DbPool,
		clock: Clock,
		sweep_interval: Duration,
		buffer_minutes: i64,
	) -> Self {
		let (shutdown, _) = watch::channel(false);

		Self { pool, clock, sweep_interval, buffer_minutes, shutdown }
	}

	/// Spawn the sweep loop; the first sweep runs immediately
	///
	/// Per-sweep errors are logged and never abort the loop.
	pub fn start(&self) -> JoinHandle<()> {
		let pool = self.pool.clone();
		let clock = self.clock.clone();
		let sweep_interval = self.sweep_interval;
		let buffer_minutes = self.buffer_minutes;
		let mut shutdown = self.shutdown.subscribe();

		info!("starting reconciliation sweep every {sweep_interval:?}");

		tokio::spawn(async move {
			loop {
				match Self::sweep(&pool, &clock, buffer_minutes).await {
					Ok(0) => debug!("reconciliation sweep: nothing expired"),
					Ok(n) => info!("reconciliation sweep completed {n} bookings"),
					Err(e) => warn!("reconciliation sweep failed: {e}"),
				}

				tokio::select! {
					() = tokio::time::sleep(sweep_interval) => {},
					_ = shutdown.changed() => break,
				}
			}

			info!("reconciliation sweep stopped");
		})
	}

	/// Spawn the hourly liveness task
	///
	/// Pure observability; it never mutates state.
	pub fn start_liveness_task(&self) -> JoinHandle<()> {
		let clock = self.clock.clone();
		let mut shutdown = self.shutdown.subscribe();

		tokio::spawn(async move {
			loop {
				info!("scheduler alive at {}", clock.now());

				tokio::select! {
					() = tokio::time::sleep(Duration::from_secs(3600)) => {},
					_ = shutdown.changed() => break,
				}
			}
		})
	}

	/// Signal every spawned task to stop after its current iteration.
	pub fn stop(&self) { let _ = self.shutdown.send(true); }

	/// Run one reconciliation pass
	///
	/// Fetches confirmed bookings dated yesterday or today, partitions
	/// out the expired ones, and completes them in a single conditional
	/// bulk update. Running the sweep twice over the same data is a
	/// no-op the second time.
	#[instrument(skip(pool, clock))]
	pub async fn sweep(
		pool: &DbPool,
		clock: &Clock,
		buffer_minutes: i64,
	) -> Result<usize, Error> {
		let conn = pool.get().await?;

		let today = clock.today();
		let days = vec![today - TimeDelta::days(1), today];

		let candidates = Booking::confirmed_on_days(days, &conn).await?;
		let expired = expired_ids(&candidates, clock, buffer_minutes);

		if expired.is_empty() {
			return Ok(0);
		}

		Booking::complete_many(expired, clock.now(), &conn).await
	}
}
