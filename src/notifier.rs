//! Fire-and-forget booking notifications
//!
//! Delivery itself (email/SMS) is an external collaborator; this module
//! only owns the queue in front of it. Failures are logged and never
//! surface to the booking caller.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// The booking events that trigger a notification.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
	Confirmation,
	Cancellation,
	Reminder,
}

/// One queued notification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Notification {
	pub kind:       NotificationKind,
	pub booking_id: i32,
}

/// A basic interface to dispatch booking notifications
#[derive(Clone, Debug)]
pub struct Notifier {
	send_queue: mpsc::Sender<Notification>,
}

/// A fake sink to keep track of notifications sent in tests
#[derive(Default)]
pub struct StubSink {
	pub received: Mutex<Vec<Notification>>,
	pub signal:   Condvar,
}

impl Notifier {
	/// Create a new notifier with a spawned delivery worker
	///
	/// With a stub sink the worker records notifications instead of
	/// handing them to the external sender.
	#[must_use]
	pub fn new(queue_size: usize, stub_sink: Option<Arc<StubSink>>) -> Self {
		let (tx, rx) = mpsc::channel(queue_size);

		match stub_sink {
			Some(sink) => {
				tokio::spawn(Self::start_stub_worker(rx, sink));
			},
			None => {
				tokio::spawn(Self::start_worker(rx));
			},
		}

		Self { send_queue: tx }
	}

	/// Enqueue a notification, swallowing every failure
	///
	/// A full queue or stopped worker costs a notification, never a
	/// booking.
	pub fn notify(&self, kind: NotificationKind, booking_id: i32) {
		let notification = Notification { kind, booking_id };

		if let Err(e) = self.send_queue.try_send(notification) {
			warn!("dropping {kind:?} notification for {booking_id}: {e}");
		}
	}

	/// Start an infinitely looping delivery worker
	#[instrument(skip_all)]
	async fn start_worker(mut rx: mpsc::Receiver<Notification>) {
		while let Some(notification) = rx.recv().await {
			// The external sender goes here; until it is wired up the
			// event trail lives in the logs.
			info!(
				"sent {:?} notification for booking {}",
				notification.kind, notification.booking_id
			);
		}
	}

	/// Start an infinitely looping stub worker
	#[instrument(skip_all)]
	async fn start_stub_worker(
		mut rx: mpsc::Receiver<Notification>,
		sink: Arc<StubSink>,
	) {
		while let Some(notification) = rx.recv().await {
			let mut received = sink.received.lock();
			received.push(notification);
			sink.signal.notify_all();
		}
	}
}
