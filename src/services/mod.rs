pub mod admin_service;
pub mod airplane_service;
pub mod airport_service;
pub mod auth_service;
pub mod crew_service;
pub mod flight_service;
pub mod order_service;
pub mod route_service;
pub mod ticket_service;

use sea_orm::{
    ConnectionTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
    sea_query::SimpleExpr,
};
use uuid::Uuid;

use crate::{
    booking::seat,
    entity::tickets::{self, Entity as Tickets},
    error::{AppError, AppResult},
};

/// Error for a foreign key in a request body that points at nothing.
pub(crate) fn missing_reference(field: &str, id: Uuid) -> AppError {
    AppError::validation(
        field,
        format!("Invalid pk \"{id}\" - object does not exist."),
    )
}

/// Rejects a layout of `rows` x `seats_in_row` when a ticket matched by
/// `sold` (a condition on tickets joined with their flight) would no longer
/// fit it.
pub(crate) async fn ensure_sold_seats_fit<C: ConnectionTrait>(
    db: &C,
    sold: SimpleExpr,
    rows: i32,
    seats_in_row: i32,
) -> AppResult<()> {
    let tickets = Tickets::find()
        .join(JoinType::InnerJoin, tickets::Relation::Flights.def())
        .filter(sold)
        .all(db)
        .await?;

    seat::ensure_layout_fits(
        tickets.iter().map(|t| (t.row, t.seat.as_str())),
        seats_in_row,
        rows,
    )
    .map_err(|err| {
        AppError::validation(
            "non_field_errors",
            format!(
                "Seat {} in row {} is already sold and does not fit the new layout.",
                err.seat, err.row
            ),
        )
    })
}
