use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::flights::{
        CreateFlightRequest, FlightDetail, FlightListItem, FlightQuery, UpdateFlightRequest,
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::Flight,
    response::ApiResponse,
    services::flight_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_flights).post(create_flight))
        .route(
            "/{id}",
            get(get_flight).put(update_flight).patch(update_flight).delete(delete_flight),
        )
}

#[utoipa::path(
    get,
    path = "/api/flights",
    params(FlightQuery),
    responses(
        (status = 200, description = "List flights, optionally filtered by code", body = ApiResponse<Vec<FlightListItem>>)
    ),
    tag = "Flights"
)]
pub async fn list_flights(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<FlightQuery>,
) -> AppResult<Json<ApiResponse<Vec<FlightListItem>>>> {
    let resp = flight_service::list_flights(&state, query).await?;
    Ok(Json(resp))
}

/// Only the detail view carries seat availability.
#[utoipa::path(
    get,
    path = "/api/flights/{id}",
    params(("id" = Uuid, Path, description = "Flight ID")),
    responses(
        (status = 200, description = "Flight with route and seat availability", body = ApiResponse<FlightDetail>),
        (status = 404, description = "Flight not found")
    ),
    tag = "Flights"
)]
pub async fn get_flight(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FlightDetail>>> {
    let resp = flight_service::get_flight(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/flights",
    request_body = CreateFlightRequest,
    responses(
        (status = 201, description = "Create flight", body = ApiResponse<Flight>),
        (status = 400, description = "Invalid code, schedule or references")
    ),
    tag = "Flights"
)]
pub async fn create_flight(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateFlightRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Flight>>)> {
    let resp = flight_service::create_flight(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/flights/{id}",
    params(("id" = Uuid, Path, description = "Flight ID")),
    request_body = UpdateFlightRequest,
    responses(
        (status = 200, description = "Update flight", body = ApiResponse<Flight>),
        (status = 400, description = "Departure not before arrival"),
        (status = 404, description = "Flight not found")
    ),
    tag = "Flights"
)]
pub async fn update_flight(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateFlightRequest>,
) -> AppResult<Json<ApiResponse<Flight>>> {
    let resp = flight_service::update_flight(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/flights/{id}",
    params(("id" = Uuid, Path, description = "Flight ID")),
    responses(
        (status = 204, description = "Flight deleted with its tickets"),
        (status = 404, description = "Flight not found")
    ),
    tag = "Flights"
)]
pub async fn delete_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    flight_service::delete_flight(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
