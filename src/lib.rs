//! # Seatwise backend library
//!
//! Seat booking and availability management for physical study centers.

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use deadpool_diesel::postgres::{Object, Pool};

mod config;

pub mod availability;
pub mod clock;
pub mod controllers;
pub mod error;
pub mod interval;
pub mod models;
pub mod notifier;
pub mod routes;
pub mod scan;
pub mod scheduler;
pub mod schema;
pub mod schemas;
pub mod validator;

pub use config::Config;
pub use error::{BookingError, Error};

use crate::clock::Clock;
use crate::notifier::Notifier;
use crate::scan::CodeImageEncoder;

pub type DbPool = Pool;
pub type DbConn = Object;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
	pub clock:         Clock,
	pub notifier:      Notifier,
	pub code_encoder:  CodeImageEncoder,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for Clock {
	fn from_ref(input: &AppState) -> Self { input.clock.clone() }
}

impl FromRef<AppState> for Notifier {
	fn from_ref(input: &AppState) -> Self { input.notifier.clone() }
}

impl FromRef<AppState> for CodeImageEncoder {
	fn from_ref(input: &AppState) -> Self { input.code_encoder.clone() }
}
