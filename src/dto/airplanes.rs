use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    booking::seat::MAX_SEATS_IN_ROW,
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirplaneTypeRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAirplaneTypeRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirplaneRequest {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAirplaneRequest {
    pub name: Option<String>,
    pub rows: Option<i32>,
    pub seats_in_row: Option<i32>,
    pub airplane_type: Option<Uuid>,
}

/// Seat letters run from `A`, so a row can hold at most 26 seats.
pub fn check_seats_in_row(seats_in_row: i32) -> AppResult<i32> {
    if !(1..=MAX_SEATS_IN_ROW).contains(&seats_in_row) {
        return Err(AppError::validation(
            "seats_in_row",
            format!("Ensure this value is between 1 and {MAX_SEATS_IN_ROW}."),
        ));
    }
    Ok(seats_in_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_in_row_is_limited_to_the_alphabet() {
        assert!(check_seats_in_row(1).is_ok());
        assert!(check_seats_in_row(26).is_ok());
        assert!(check_seats_in_row(0).is_err());
        assert!(check_seats_in_row(27).is_err());
    }
}
