//! Seat rules, availability accounting and visibility scoping for bookings.

pub mod availability;
pub mod scope;
pub mod seat;

pub use availability::SeatAvailability;
pub use seat::{SeatError, SeatLabel};
