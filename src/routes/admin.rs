use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::AuditLog,
    response::ApiResponse,
    routes::params::Pagination,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list_audit_logs))
}

#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    params(Pagination),
    responses(
        (status = 200, description = "Audit trail, newest first", body = ApiResponse<Vec<AuditLog>>),
        (status = 403, description = "Caller is not staff")
    ),
    tag = "Admin"
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<AuditLog>>>> {
    let resp = admin_service::list_audit_logs(&state, &user, pagination).await?;
    Ok(Json(resp))
}
