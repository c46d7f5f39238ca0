use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// New accounts always get the `user` role; staff are promoted out of band.
#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "passenger@example.com")]
    pub email: String,
    /// At least 8 characters.
    #[schema(example = "correct-horse")]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "passenger@example.com")]
    pub email: String,
    #[schema(example = "correct-horse")]
    pub password: String,
}

/// `token` already carries the `Bearer ` prefix, ready for the Authorization header.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// JWT payload. `sub` is the user id, `role` is `user` or `staff`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
