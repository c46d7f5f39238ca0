use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    booking::scope::visible_tickets,
    dto::tickets::TicketListItem,
    entity::{
        flights::{Column as FlightCol, Entity as Flights},
        orders::{Column as OrderCol, Entity as Orders},
        tickets::{self, Column as TicketCol},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

fn unique_ids(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Resolves flight codes and the ordering user's email for each ticket.
pub(crate) async fn ticket_list_items<C: ConnectionTrait>(
    db: &C,
    tickets: Vec<tickets::Model>,
) -> AppResult<Vec<TicketListItem>> {
    if tickets.is_empty() {
        return Ok(Vec::new());
    }

    let flight_ids = unique_ids(tickets.iter().map(|t| t.flight_id));
    let codes: HashMap<Uuid, String> = Flights::find()
        .filter(FlightCol::Id.is_in(flight_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, f.code))
        .collect();

    let order_ids = unique_ids(tickets.iter().map(|t| t.order_id));
    let emails: HashMap<Uuid, String> = Orders::find()
        .filter(OrderCol::Id.is_in(order_ids))
        .find_also_related(Users)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(order, user)| user.map(|u| (order.id, u.email)))
        .collect();

    tickets
        .into_iter()
        .map(|ticket| {
            let flight = codes.get(&ticket.flight_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("ticket {} has no flight", ticket.id))
            })?;
            let person_who_ordered = emails.get(&ticket.order_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("ticket {} has no owner", ticket.id))
            })?;
            Ok(TicketListItem {
                id: ticket.id,
                row: ticket.row,
                seat: ticket.seat,
                flight,
                person_who_ordered,
            })
        })
        .collect()
}

/// Tickets are listed through their orders, so callers only see their own
/// unless they are staff. Tickets are only ever created with their order.
pub async fn list_tickets(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<TicketListItem>>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = visible_tickets(user)
        .order_by_asc(TicketCol::FlightId)
        .order_by_asc(TicketCol::Row)
        .order_by_asc(TicketCol::Seat);

    let total = finder.clone().count(&state.orm).await?;
    let tickets = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = ticket_list_items(&state.orm, tickets).await?;
    Ok(ApiResponse::success(
        "Tickets",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}
