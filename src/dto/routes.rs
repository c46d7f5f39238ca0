use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRouteRequest {
    pub source: Uuid,
    pub destination: Uuid,
    pub distance: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRouteRequest {
    pub source: Option<Uuid>,
    pub destination: Option<Uuid>,
    pub distance: Option<i32>,
}

/// Route as shown in list views: just the airport names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouteListItem {
    pub id: Uuid,
    pub source: String,
    pub destination: String,
}

/// Route as shown on its own page and nested inside a flight.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouteDetail {
    pub id: Uuid,
    pub airport_of_departure: String,
    pub airport_of_arrival: String,
    pub city_of_departure: String,
    pub city_of_arrival: String,
    pub distance: i32,
}
