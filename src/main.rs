#[macro_use]
extern crate tracing;

use seatwise::notifier::Notifier;
use seatwise::scheduler::ReconciliationScheduler;
use seatwise::{AppState, Config, routes, scan};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::DEBUG)
		.init();

	// Set up the configuration.
	let config = Config::from_env();

	// Set up the database connection pool.
	let pool = config.create_database_pool();

	let clock = config.clock();
	let notifier = Notifier::new(config.notification_queue_size, None);

	let scheduler = ReconciliationScheduler::new(
		pool.clone(),
		clock.clone(),
		config.sweep_interval,
		config.completion_buffer_minutes,
	);
	scheduler.start();
	scheduler.start_liveness_task();

	let state = AppState {
		config,
		database_pool: pool,
		clock,
		notifier,
		code_encoder: scan::noop_encoder(),
	};

	let app = routes::get_app_router(state);

	let listener = TcpListener::bind("0.0.0.0:80").await.unwrap();
	debug!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();

	scheduler.stop();
}

async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
}
