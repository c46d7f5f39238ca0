use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::tickets::TicketListItem,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::ticket_service,
    state::AppState,
};

/// Read only. Any other method on `/tickets` answers 405.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_tickets))
}

#[utoipa::path(
    get,
    path = "/api/tickets",
    params(Pagination),
    responses(
        (status = 200, description = "Caller's tickets, or every ticket for staff", body = ApiResponse<Vec<TicketListItem>>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Tickets"
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<TicketListItem>>>> {
    let resp = ticket_service::list_tickets(&state, &user, pagination).await?;
    Ok(Json(resp))
}
