//! Airplane types and airplanes. The two are mounted under separate prefixes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::airplanes::{
        CreateAirplaneRequest, CreateAirplaneTypeRequest, UpdateAirplaneRequest,
        UpdateAirplaneTypeRequest,
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::{Airplane, AirplaneType},
    response::ApiResponse,
    routes::params::Pagination,
    services::airplane_service,
    state::AppState,
};

pub fn types_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airplane_types).post(create_airplane_type))
        .route(
            "/{id}",
            get(get_airplane_type)
                .put(update_airplane_type)
                .patch(update_airplane_type)
                .delete(delete_airplane_type),
        )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airplanes).post(create_airplane))
        .route(
            "/{id}",
            get(get_airplane).put(update_airplane).patch(update_airplane).delete(delete_airplane),
        )
}

#[utoipa::path(
    get,
    path = "/api/airplane_types",
    params(Pagination),
    responses(
        (status = 200, description = "List airplane types", body = ApiResponse<Vec<AirplaneType>>)
    ),
    tag = "Airplanes"
)]
pub async fn list_airplane_types(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<AirplaneType>>>> {
    let resp = airplane_service::list_airplane_types(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/airplane_types/{id}",
    params(("id" = Uuid, Path, description = "Airplane type ID")),
    responses(
        (status = 200, description = "Get airplane type", body = ApiResponse<AirplaneType>),
        (status = 404, description = "Airplane type not found")
    ),
    tag = "Airplanes"
)]
pub async fn get_airplane_type(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AirplaneType>>> {
    let resp = airplane_service::get_airplane_type(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplane_types",
    request_body = CreateAirplaneTypeRequest,
    responses(
        (status = 201, description = "Create airplane type", body = ApiResponse<AirplaneType>)
    ),
    tag = "Airplanes"
)]
pub async fn create_airplane_type(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateAirplaneTypeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AirplaneType>>)> {
    let resp = airplane_service::create_airplane_type(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/airplane_types/{id}",
    params(("id" = Uuid, Path, description = "Airplane type ID")),
    request_body = UpdateAirplaneTypeRequest,
    responses(
        (status = 200, description = "Update airplane type", body = ApiResponse<AirplaneType>),
        (status = 404, description = "Airplane type not found")
    ),
    tag = "Airplanes"
)]
pub async fn update_airplane_type(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateAirplaneTypeRequest>,
) -> AppResult<Json<ApiResponse<AirplaneType>>> {
    let resp = airplane_service::update_airplane_type(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/airplane_types/{id}",
    params(("id" = Uuid, Path, description = "Airplane type ID")),
    responses(
        (status = 204, description = "Airplane type deleted with its airplanes"),
        (status = 404, description = "Airplane type not found")
    ),
    tag = "Airplanes"
)]
pub async fn delete_airplane_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    airplane_service::delete_airplane_type(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/airplanes",
    params(Pagination),
    responses(
        (status = 200, description = "List airplanes", body = ApiResponse<Vec<Airplane>>)
    ),
    tag = "Airplanes"
)]
pub async fn list_airplanes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Airplane>>>> {
    let resp = airplane_service::list_airplanes(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/airplanes/{id}",
    params(("id" = Uuid, Path, description = "Airplane ID")),
    responses(
        (status = 200, description = "Get airplane", body = ApiResponse<Airplane>),
        (status = 404, description = "Airplane not found")
    ),
    tag = "Airplanes"
)]
pub async fn get_airplane(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Airplane>>> {
    let resp = airplane_service::get_airplane(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplanes",
    request_body = CreateAirplaneRequest,
    responses(
        (status = 201, description = "Create airplane", body = ApiResponse<Airplane>),
        (status = 400, description = "Invalid layout or unknown airplane type")
    ),
    tag = "Airplanes"
)]
pub async fn create_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateAirplaneRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Airplane>>)> {
    let resp = airplane_service::create_airplane(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/airplanes/{id}",
    params(("id" = Uuid, Path, description = "Airplane ID")),
    request_body = UpdateAirplaneRequest,
    responses(
        (status = 200, description = "Update airplane", body = ApiResponse<Airplane>),
        (status = 404, description = "Airplane not found")
    ),
    tag = "Airplanes"
)]
pub async fn update_airplane(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateAirplaneRequest>,
) -> AppResult<Json<ApiResponse<Airplane>>> {
    let resp = airplane_service::update_airplane(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/airplanes/{id}",
    params(("id" = Uuid, Path, description = "Airplane ID")),
    responses(
        (status = 204, description = "Airplane deleted with its flights"),
        (status = 404, description = "Airplane not found")
    ),
    tag = "Airplanes"
)]
pub async fn delete_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    airplane_service::delete_airplane(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
