use std::sync::Arc;
use std::time::Duration;

use seatwise::notifier::{Notification, NotificationKind, Notifier, StubSink};

/// Wait until the sink has received at least `count` notifications.
async fn wait_for(sink: &StubSink, count: usize) -> Vec<Notification> {
	for _ in 0..100 {
		{
			let received = sink.received.lock();
			if received.len() >= count {
				return received.clone();
			}
		}

		tokio::time::sleep(Duration::from_millis(10)).await;
	}

	panic!("sink never received {count} notifications");
}

#[tokio::test(flavor = "multi_thread")]
async fn notifications_reach_the_sink() {
	let sink = Arc::new(StubSink::default());
	let notifier = Notifier::new(16, Some(Arc::clone(&sink)));

	notifier.notify(NotificationKind::Confirmation, 42);

	let received = wait_for(&sink, 1).await;

	assert_eq!(received[0].kind, NotificationKind::Confirmation);
	assert_eq!(received[0].booking_id, 42);
}

#[tokio::test(flavor = "multi_thread")]
async fn notifications_keep_their_order() {
	let sink = Arc::new(StubSink::default());
	let notifier = Notifier::new(16, Some(Arc::clone(&sink)));

	notifier.notify(NotificationKind::Confirmation, 1);
	notifier.notify(NotificationKind::Cancellation, 1);
	notifier.notify(NotificationKind::Reminder, 2);

	let received = wait_for(&sink, 3).await;

	assert_eq!(
		received
			.iter()
			.map(|n| (n.kind, n.booking_id))
			.collect::<Vec<_>>(),
		vec![
			(NotificationKind::Confirmation, 1),
			(NotificationKind::Cancellation, 1),
			(NotificationKind::Reminder, 2),
		]
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn a_full_queue_drops_instead_of_blocking() {
	let sink = Arc::new(StubSink::default());
	let notifier = Notifier::new(1, Some(Arc::clone(&sink)));

	// Flood well past the queue size; notify must return every time
	for id in 0..64 {
		notifier.notify(NotificationKind::Reminder, id);
	}

	let received = wait_for(&sink, 1).await;

	assert!(!received.is_empty());
}
