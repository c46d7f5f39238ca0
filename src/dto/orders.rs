use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::tickets::TicketListItem,
    models::{Order, Ticket},
};

/// The owning user is never read from the body; it is the authenticated caller.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub tickets: Vec<TicketRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TicketRequest {
    pub row: i32,
    pub seat: String,
    pub flight: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithTickets {
    pub order: Order,
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderUserSummary {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderUserDetail {
    pub id: Uuid,
    pub email: String,
    pub is_staff: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListItem {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user: OrderUserSummary,
    pub tickets: Vec<TicketListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user: OrderUserDetail,
    pub tickets: Vec<TicketListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_in_body_is_ignored() {
        let payload: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "user": Uuid::new_v4(),
            "tickets": [{ "row": 10, "seat": "10A", "flight": Uuid::nil() }],
        }))
        .unwrap();
        assert_eq!(payload.tickets.len(), 1);
        assert_eq!(payload.tickets[0].seat, "10A");
    }
}
