use serde::Serialize;
use utoipa::ToSchema;

/// Seat counts for one flight, derived from its airplane layout and sold tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeatAvailability {
    pub taken_seats: i64,
    /// Not clamped at zero: concurrent overbooking shows up as a negative count.
    pub available_seats: i64,
}

impl SeatAvailability {
    pub fn compute(rows: i32, seats_in_row: i32, taken: u64) -> Self {
        let taken_seats = i64::try_from(taken).unwrap_or(i64::MAX);
        Self {
            taken_seats,
            available_seats: capacity(rows, seats_in_row).saturating_sub(taken_seats),
        }
    }
}

pub fn capacity(rows: i32, seats_in_row: i32) -> i64 {
    i64::from(rows) * i64::from(seats_in_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_add_up_to_capacity() {
        for taken in [0_u64, 1, 4, 119, 120] {
            let seats = SeatAvailability::compute(20, 6, taken);
            assert_eq!(seats.taken_seats, taken as i64);
            assert_eq!(seats.available_seats + seats.taken_seats, capacity(20, 6));
        }
    }

    #[test]
    fn empty_flight_is_fully_available() {
        let seats = SeatAvailability::compute(20, 6, 0);
        assert_eq!(seats.available_seats, 120);
        assert_eq!(seats.taken_seats, 0);
    }

    #[test]
    fn overbooking_goes_negative() {
        let seats = SeatAvailability::compute(1, 2, 3);
        assert_eq!(seats.available_seats, -1);
    }
}
