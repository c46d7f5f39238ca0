use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::routes::{CreateRouteRequest, RouteDetail, RouteListItem, UpdateRouteRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::Route,
    response::ApiResponse,
    routes::params::Pagination,
    services::route_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route(
            "/{id}",
            get(get_route).put(update_route).patch(update_route).delete(delete_route),
        )
}

#[utoipa::path(
    get,
    path = "/api/routes",
    params(Pagination),
    responses(
        (status = 200, description = "List routes with airport names", body = ApiResponse<Vec<RouteListItem>>)
    ),
    tag = "Routes"
)]
pub async fn list_routes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<RouteListItem>>>> {
    let resp = route_service::list_routes(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route with airports and cities", body = ApiResponse<RouteDetail>),
        (status = 404, description = "Route not found")
    ),
    tag = "Routes"
)]
pub async fn get_route(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RouteDetail>>> {
    let resp = route_service::get_route(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/routes",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Create route", body = ApiResponse<Route>),
        (status = 400, description = "Unknown airport or non-positive distance")
    ),
    tag = "Routes"
)]
pub async fn create_route(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateRouteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Route>>)> {
    let resp = route_service::create_route(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = UpdateRouteRequest,
    responses(
        (status = 200, description = "Update route", body = ApiResponse<Route>),
        (status = 404, description = "Route not found")
    ),
    tag = "Routes"
)]
pub async fn update_route(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateRouteRequest>,
) -> AppResult<Json<ApiResponse<Route>>> {
    let resp = route_service::update_route(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Route deleted with its flights"),
        (status = 404, description = "Route not found")
    ),
    tag = "Routes"
)]
pub async fn delete_route(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    route_service::delete_route(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
