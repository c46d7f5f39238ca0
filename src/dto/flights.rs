use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    dto::routes::RouteDetail,
    error::{AppError, AppResult},
    routes::params::Pagination,
};

pub const MAX_CODE_LEN: usize = 7;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFlightRequest {
    pub code: String,
    pub route: Uuid,
    pub airplane: Uuid,
    #[serde(deserialize_with = "crate::dto::datetime::deserialize")]
    #[schema(value_type = String, example = "2024-11-25T16:20:15")]
    pub departure_time: DateTime<Utc>,
    #[serde(deserialize_with = "crate::dto::datetime::deserialize")]
    #[schema(value_type = String, example = "2024-11-25T21:20:15")]
    pub arrival_time: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFlightRequest {
    pub code: Option<String>,
    pub route: Option<Uuid>,
    pub airplane: Option<Uuid>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    #[schema(value_type = Option<String>)]
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    #[schema(value_type = Option<String>)]
    pub arrival_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FlightQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Case-insensitive substring of the flight code.
    pub code: Option<String>,
}

impl FlightQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Flight as shown in list views. Seat counts only appear on the detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlightListItem {
    pub id: Uuid,
    pub code: String,
    pub city_of_departure: String,
    pub city_of_arrival: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub airplane: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlightDetail {
    pub id: Uuid,
    pub code: String,
    pub available_seats: i64,
    pub taken_seats: i64,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub airplane: Uuid,
    pub route: RouteDetail,
}

pub fn check_code(code: &str) -> AppResult<String> {
    let code = crate::dto::required_text("code", code, MAX_CODE_LEN)?;
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "code",
            "Flight code may only contain letters and digits.",
        ));
    }
    Ok(code)
}

pub fn check_schedule(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> AppResult<()> {
    if departure >= arrival {
        return Err(AppError::validation(
            "non_field_errors",
            "The departure date must be before the arrival date",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::dto::datetime::parse;

    use super::*;

    #[test]
    fn arrival_before_departure_is_rejected() {
        let departure = parse("2024-11-25T16:20:15").unwrap();
        let arrival = parse("2024-10-25T16:20:15").unwrap();
        assert!(matches!(
            check_schedule(departure, arrival),
            Err(AppError::Validation { .. })
        ));
        assert!(check_schedule(departure, departure).is_err());
        assert!(check_schedule(arrival, departure).is_ok());
    }

    #[test]
    fn codes_are_short_and_alphanumeric() {
        assert_eq!(check_code(" FL5699 ").unwrap(), "FL5699");
        assert!(check_code("FL-12").is_err());
        assert!(check_code("FL123456").is_err());
        assert!(check_code("").is_err());
    }

    #[test]
    fn create_request_accepts_naive_timestamps() {
        let payload: CreateFlightRequest = serde_json::from_value(serde_json::json!({
            "code": "FL5699",
            "route": Uuid::nil(),
            "airplane": Uuid::nil(),
            "departure_time": "2024-11-25T16:20:15",
            "arrival_time": "2024-12-25T16:20:15",
        }))
        .unwrap();
        assert!(payload.departure_time < payload.arrival_time);
    }
}
