use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::booking::{
	cancel_booking,
	check_in_booking,
	check_out_booking,
	create_booking,
	get_seat_availability,
	mark_booking_no_show,
};
use crate::controllers::healthcheck;
use crate::controllers::location::{
	create_location,
	get_location,
	get_locations,
};
use crate::controllers::scan::resolve_scan;
use crate::controllers::seat::{
	activate_seat,
	create_location_seats,
	deactivate_seat,
	get_location_seats,
	get_seat_code,
};
use crate::controllers::time_slot::{
	activate_time_slot,
	create_location_time_slot,
	deactivate_time_slot,
	get_location_time_slots,
};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.route("/scan", get(resolve_scan))
		.nest("/locations", location_routes())
		.nest("/seats", seat_routes())
		.nest("/time-slots", time_slot_routes())
		.nest("/bookings", booking_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Location registry routes
fn location_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_locations).post(create_location))
		.route("/{id}", get(get_location))
		.route(
			"/{id}/seats",
			get(get_location_seats).post(create_location_seats),
		)
		.route(
			"/{id}/time-slots",
			get(get_location_time_slots).post(create_location_time_slot),
		)
}

/// Seat routes
fn seat_routes() -> Router<AppState> {
	Router::new()
		.route("/{id}/activate", post(activate_seat))
		.route("/{id}/deactivate", post(deactivate_seat))
		.route("/{id}/code", get(get_seat_code))
		.route("/{id}/availability", get(get_seat_availability))
}

/// Time slot routes
fn time_slot_routes() -> Router<AppState> {
	Router::new()
		.route("/{id}/activate", post(activate_time_slot))
		.route("/{id}/deactivate", post(deactivate_time_slot))
}

/// Booking lifecycle routes
fn booking_routes() -> Router<AppState> {
	Router::new()
		.route("/", post(create_booking))
		.route("/{id}/cancel", post(cancel_booking))
		.route("/{id}/check-in", post(check_in_booking))
		.route("/{id}/check-out", post(check_out_booking))
		.route("/{id}/no-show", post(mark_booking_no_show))
}
