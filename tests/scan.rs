use seatwise::Error;
use seatwise::scan::{
	ScanTarget,
	noop_encoder,
	parse_scan_payload,
	seat_deep_link,
};

#[test]
fn deep_links_are_stable() {
	assert_eq!(
		seat_deep_link("https://app.seatwise.in", 3, 12),
		"https://app.seatwise.in/locations/3/seats/12"
	);

	// A trailing slash on the base must not double up
	assert_eq!(
		seat_deep_link("https://app.seatwise.in/", 3, 12),
		"https://app.seatwise.in/locations/3/seats/12"
	);
}

#[test]
fn parses_the_deep_link_form() {
	let target =
		parse_scan_payload("https://app.seatwise.in/locations/3/seats/12")
			.unwrap();

	assert_eq!(target, ScanTarget { location_id: 3, seat_number: 12 });
}

#[test]
fn parses_the_legacy_json_envelope() {
	let target =
		parse_scan_payload(r#"{"locationId": 3, "seatNumber": 12}"#).unwrap();

	assert_eq!(target, ScanTarget { location_id: 3, seat_number: 12 });
}

#[test]
fn trims_surrounding_whitespace() {
	let target = parse_scan_payload(
		"  https://app.seatwise.in/locations/3/seats/12\n",
	)
	.unwrap();

	assert_eq!(target, ScanTarget { location_id: 3, seat_number: 12 });
}

#[test]
fn rejects_unrecognized_payloads() {
	for raw in [
		"",
		"not a url",
		"https://app.seatwise.in/locations/3",
		"https://app.seatwise.in/locations/x/seats/12",
		r#"{"locationId": 3}"#,
		"{broken json",
	] {
		assert!(
			matches!(
				parse_scan_payload(raw),
				Err(Error::ValidationError(_))
			),
			"accepted {raw:?}"
		);
	}
}

#[test]
fn the_noop_encoder_produces_no_image() {
	let encoder = noop_encoder();

	assert!(encoder("https://app.seatwise.in/locations/3/seats/12").is_none());
}
