use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCrewRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCrewRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
