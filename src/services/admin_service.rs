use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

use crate::{
    entity::audit_logs::{Column as AuditCol, Entity as AuditLogs},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_staff},
    models::AuditLog,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Newest entries first. Staff only.
pub async fn list_audit_logs(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<AuditLog>>> {
    ensure_staff(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = AuditLogs::find().order_by_desc(AuditCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(AuditLog::from)
        .collect();

    Ok(ApiResponse::success(
        "Audit logs",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}
