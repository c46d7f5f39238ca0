use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::airports::{CreateAirportRequest, UpdateAirportRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::Airport,
    response::ApiResponse,
    routes::params::Pagination,
    services::airport_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airports).post(create_airport))
        .route(
            "/{id}",
            get(get_airport).put(update_airport).patch(update_airport).delete(delete_airport),
        )
}

#[utoipa::path(
    get,
    path = "/api/airports",
    params(Pagination),
    responses(
        (status = 200, description = "List airports", body = ApiResponse<Vec<Airport>>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Airports"
)]
pub async fn list_airports(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Airport>>>> {
    let resp = airport_service::list_airports(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/airports/{id}",
    params(("id" = Uuid, Path, description = "Airport ID")),
    responses(
        (status = 200, description = "Get airport", body = ApiResponse<Airport>),
        (status = 404, description = "Airport not found")
    ),
    tag = "Airports"
)]
pub async fn get_airport(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Airport>>> {
    let resp = airport_service::get_airport(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airports",
    request_body = CreateAirportRequest,
    responses(
        (status = 201, description = "Create airport", body = ApiResponse<Airport>),
        (status = 400, description = "Invalid payload")
    ),
    tag = "Airports"
)]
pub async fn create_airport(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateAirportRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Airport>>)> {
    let resp = airport_service::create_airport(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/airports/{id}",
    params(("id" = Uuid, Path, description = "Airport ID")),
    request_body = UpdateAirportRequest,
    responses(
        (status = 200, description = "Update airport", body = ApiResponse<Airport>),
        (status = 404, description = "Airport not found")
    ),
    tag = "Airports"
)]
pub async fn update_airport(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateAirportRequest>,
) -> AppResult<Json<ApiResponse<Airport>>> {
    let resp = airport_service::update_airport(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/airports/{id}",
    params(("id" = Uuid, Path, description = "Airport ID")),
    responses(
        (status = 204, description = "Airport deleted with its routes"),
        (status = 404, description = "Airport not found")
    ),
    tag = "Airports"
)]
pub async fn delete_airport(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    airport_service::delete_airport(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
