pub mod booking;
pub mod location;
pub mod seat;
pub mod time_slot;
