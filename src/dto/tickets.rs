use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Ticket as shown in ticket and order listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketListItem {
    pub id: Uuid,
    pub row: i32,
    pub seat: String,
    /// Flight code.
    pub flight: String,
    /// Email of the user who placed the order.
    pub person_who_ordered: String,
}
