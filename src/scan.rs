//! Scan payload boundary adapter
//!
//! Seats carry a scannable code bound to a stable deep link. Older
//! codes in the field carry a JSON envelope instead of a URL, so the
//! parser accepts both. This stays outside the availability engine;
//! the engine only ever sees a resolved seat.

use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::error::Error;

/// The seat a scanned code points at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanTarget {
	pub location_id: i32,
	pub seat_number: i32,
}

/// Legacy JSON envelope emitted by the first generation of seat codes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEnvelope {
	location_id: i32,
	seat_number: i32,
}

/// The external code-image generator, consumed as an opaque function
///
/// `None` means the image could not be produced; that is recoverable,
/// the seat stays usable through its deep link.
pub type CodeImageEncoder =
	Arc<dyn Fn(&str) -> Option<Vec<u8>> + Send + Sync>;

/// An encoder for deployments without a code-image generator wired up.
#[must_use]
pub fn noop_encoder() -> CodeImageEncoder { Arc::new(|_| None) }

/// The stable deep link encoded into a seat's scannable code.
#[must_use]
pub fn seat_deep_link(base_url: &str, location_id: i32, number: i32) -> String {
	format!(
		"{}/locations/{location_id}/seats/{number}",
		base_url.trim_end_matches('/')
	)
}

/// Parse a raw scan payload into a [`ScanTarget`]
///
/// Accepts the deep-link URL form and the legacy JSON envelope.
///
/// # Errors
/// Fails with a validation error if the payload matches neither form.
pub fn parse_scan_payload(raw: &str) -> Result<ScanTarget, Error> {
	let raw = raw.trim();

	if raw.starts_with('{') {
		let envelope: LegacyEnvelope = serde_json::from_str(raw)
			.map_err(|_| {
				Error::ValidationError("unrecognized scan payload".to_string())
			})?;

		return Ok(ScanTarget {
			location_id: envelope.location_id,
			seat_number: envelope.seat_number,
		});
	}

	let url = Url::parse(raw).map_err(|_| {
		Error::ValidationError("unrecognized scan payload".to_string())
	})?;

	let segments: Vec<&str> =
		url.path_segments().map(Iterator::collect).unwrap_or_default();

	match segments.as_slice() {
		[.., "locations", location, "seats", seat] => {
			let location_id = location.parse().map_err(|_| {
				Error::ValidationError("invalid location in scan".to_string())
			})?;
			let seat_number = seat.parse().map_err(|_| {
				Error::ValidationError("invalid seat in scan".to_string())
			})?;

			Ok(ScanTarget { location_id, seat_number })
		},
		_ => Err(Error::ValidationError(
			"unrecognized scan payload".to_string(),
		)),
	}
}
