use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirportRequest {
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAirportRequest {
    pub name: Option<String>,
    pub closest_big_city: Option<String>,
}
