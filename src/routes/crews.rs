use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::crews::{CreateCrewRequest, UpdateCrewRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::Crew,
    response::ApiResponse,
    routes::params::Pagination,
    services::crew_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crews).post(create_crew))
        .route(
            "/{id}",
            get(get_crew).put(update_crew).patch(update_crew).delete(delete_crew),
        )
}

#[utoipa::path(
    get,
    path = "/api/crews",
    params(Pagination),
    responses(
        (status = 200, description = "List crew members", body = ApiResponse<Vec<Crew>>)
    ),
    tag = "Crews"
)]
pub async fn list_crews(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Crew>>>> {
    let resp = crew_service::list_crews(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/crews/{id}",
    params(("id" = Uuid, Path, description = "Crew member ID")),
    responses(
        (status = 200, description = "Get crew member", body = ApiResponse<Crew>),
        (status = 404, description = "Crew member not found")
    ),
    tag = "Crews"
)]
pub async fn get_crew(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Crew>>> {
    let resp = crew_service::get_crew(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/crews",
    request_body = CreateCrewRequest,
    responses(
        (status = 201, description = "Create crew member", body = ApiResponse<Crew>)
    ),
    tag = "Crews"
)]
pub async fn create_crew(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateCrewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Crew>>)> {
    let resp = crew_service::create_crew(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/crews/{id}",
    params(("id" = Uuid, Path, description = "Crew member ID")),
    request_body = UpdateCrewRequest,
    responses(
        (status = 200, description = "Update crew member", body = ApiResponse<Crew>),
        (status = 404, description = "Crew member not found")
    ),
    tag = "Crews"
)]
pub async fn update_crew(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCrewRequest>,
) -> AppResult<Json<ApiResponse<Crew>>> {
    let resp = crew_service::update_crew(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/crews/{id}",
    params(("id" = Uuid, Path, description = "Crew member ID")),
    responses(
        (status = 204, description = "Crew member deleted"),
        (status = 404, description = "Crew member not found")
    ),
    tag = "Crews"
)]
pub async fn delete_crew(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    crew_service::delete_crew(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
