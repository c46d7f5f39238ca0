use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{
        airplane_types, airplanes, airports, audit_logs, crews, flights, orders, routes, tickets,
        users,
    },
    middleware::auth::ROLE_STAFF,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Route {
    pub id: Uuid,
    pub source: Uuid,
    pub destination: Uuid,
    pub distance: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AirplaneType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Airplane {
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Flight {
    pub id: Uuid,
    pub code: String,
    pub route: Uuid,
    pub airplane: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Crew {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub id: Uuid,
    pub row: i32,
    pub seat: String,
    pub flight: Uuid,
    pub order: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub resource: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            is_staff: model.role == ROLE_STAFF,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<airports::Model> for Airport {
    fn from(model: airports::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            closest_big_city: model.closest_big_city,
        }
    }
}

impl From<routes::Model> for Route {
    fn from(model: routes::Model) -> Self {
        Self {
            id: model.id,
            source: model.source_id,
            destination: model.destination_id,
            distance: model.distance,
        }
    }
}

impl From<airplane_types::Model> for AirplaneType {
    fn from(model: airplane_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<airplanes::Model> for Airplane {
    fn from(model: airplanes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            rows: model.rows,
            seats_in_row: model.seats_in_row,
            airplane_type: model.airplane_type_id,
        }
    }
}

impl From<flights::Model> for Flight {
    fn from(model: flights::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            route: model.route_id,
            airplane: model.airplane_id,
            departure_time: model.departure_time.with_timezone(&Utc),
            arrival_time: model.arrival_time.with_timezone(&Utc),
        }
    }
}

impl From<crews::Model> for Crew {
    fn from(model: crews::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<tickets::Model> for Ticket {
    fn from(model: tickets::Model) -> Self {
        Self {
            id: model.id,
            row: model.row,
            seat: model.seat,
            flight: model.flight_id,
            order: model.order_id,
        }
    }
}

impl From<audit_logs::Model> for AuditLog {
    fn from(model: audit_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            resource: model.resource,
            metadata: model.metadata,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
