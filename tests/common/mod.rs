//! Shared builders for the DB-free booking core tests

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use seatwise::models::{Booking, BookingStatus, Seat, SeatCategory, TimeSlot};

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub fn time(raw: &str) -> NaiveTime {
	seatwise::interval::parse_time(raw).unwrap()
}

#[allow(dead_code)]
pub fn datetime(y: i32, m: u32, d: u32, raw_time: &str) -> NaiveDateTime {
	date(y, m, d).and_time(time(raw_time))
}

#[allow(dead_code)]
pub fn booking(
	id: i32,
	user_id: i32,
	day: NaiveDate,
	start: &str,
	end: &str,
	status: BookingStatus,
) -> Booking {
	let start_time = time(start);
	let end_time = time(end);
	let created_at = day.and_time(time("00:00"));

	Booking {
		id,
		seat_id: 1,
		user_id,
		time_slot_id: None,
		day,
		start_time,
		end_time,
		duration_minutes: seatwise::interval::duration_minutes(
			start_time, end_time,
		),
		status,
		checked_in: false,
		checked_in_at: None,
		checked_out: false,
		checked_out_at: None,
		cancelled_at: None,
		cancel_reason: None,
		notes: None,
		created_at,
		updated_at: created_at,
	}
}

#[allow(dead_code)]
pub fn seat(id: i32, is_active: bool) -> Seat {
	let created_at = datetime(2025, 1, 1, "00:00");

	Seat {
		id,
		location_id: 1,
		number: id,
		seat_row: 1,
		seat_column: id,
		category: SeatCategory::Regular,
		is_active,
		facilities: vec![],
		notes: None,
		code_url: format!("https://app.seatwise.in/locations/1/seats/{id}"),
		created_at,
		updated_at: created_at,
	}
}

#[allow(dead_code)]
pub fn time_slot(
	start: &str,
	end: &str,
	days_of_week: &[&str],
	max_booking_minutes: i32,
) -> TimeSlot {
	let created_at = datetime(2025, 1, 1, "00:00");

	TimeSlot {
		id: 1,
		location_id: 1,
		name: "study hours".to_string(),
		start_time: time(start),
		end_time: time(end),
		days_of_week: days_of_week.iter().map(ToString::to_string).collect(),
		max_booking_minutes,
		is_active: true,
		created_at,
		updated_at: created_at,
	}
}
