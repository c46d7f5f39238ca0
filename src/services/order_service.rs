use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    booking::{SeatLabel, scope::scope_orders, seat},
    dto::orders::{
        CreateOrderRequest, OrderDetail, OrderListItem, OrderUserDetail, OrderUserSummary,
        OrderWithTickets, TicketRequest,
    },
    entity::{
        airplanes::{self, Entity as Airplanes},
        flights::{Column as FlightCol, Entity as Flights},
        orders::{self, ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        tickets::{self, ActiveModel as TicketActive, Column as TicketCol, Entity as Tickets},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ROLE_STAFF},
    models::{Order, Ticket},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{missing_reference, ticket_service::ticket_list_items},
    state::AppState,
};

/// A ticket request that passed the layout checks, with its seat label in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeatRequest {
    pub flight: Uuid,
    pub row: i32,
    pub seat: String,
}

/// Rejects empty orders and seats requested twice in the same order.
/// Seat labels are compared in canonical form, so `10a` and `10A` collide.
pub fn check_ticket_requests(requests: &[TicketRequest]) -> AppResult<()> {
    if requests.is_empty() {
        return Err(AppError::validation(
            "tickets",
            "This list may not be empty.",
        ));
    }

    let mut seen = HashSet::with_capacity(requests.len());
    for request in requests {
        let label = request
            .seat
            .parse::<SeatLabel>()
            .map(|label| label.to_string())
            .unwrap_or_else(|_| request.seat.clone());
        if !seen.insert((request.flight, request.row, label.clone())) {
            return Err(AppError::validation(
                "tickets",
                format!(
                    "Seat {label} on flight {} is requested more than once.",
                    request.flight
                ),
            ));
        }
    }
    Ok(())
}

/// Validates every request against its flight's airplane and returns the
/// seats to insert, in request order.
fn seat_requests(
    requests: &[TicketRequest],
    layouts: &HashMap<Uuid, airplanes::Model>,
) -> AppResult<Vec<SeatRequest>> {
    requests
        .iter()
        .map(|request| {
            let airplane = layouts
                .get(&request.flight)
                .ok_or_else(|| missing_reference("flight", request.flight))?;
            seat::validate(
                &request.seat,
                request.row,
                airplane.seats_in_row,
                airplane.rows,
            )?;
            let label = request
                .seat
                .parse::<SeatLabel>()
                .map_err(|err| AppError::validation("seat", err.to_string()))?;
            Ok(SeatRequest {
                flight: request.flight,
                row: request.row,
                seat: label.to_string(),
            })
        })
        .collect()
}

/// Airplane layout per requested flight. Unknown flights are simply absent.
async fn load_layouts<C: ConnectionTrait>(
    db: &C,
    requests: &[TicketRequest],
) -> AppResult<HashMap<Uuid, airplanes::Model>> {
    let mut flight_ids: Vec<Uuid> = requests.iter().map(|r| r.flight).collect();
    flight_ids.sort_unstable();
    flight_ids.dedup();

    let rows = Flights::find()
        .filter(FlightCol::Id.is_in(flight_ids))
        .find_also_related(Airplanes)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(flight, airplane)| airplane.map(|a| (flight.id, a)))
        .collect())
}

/// Advisory only: two concurrent orders can both pass this check, in which
/// case the unique index on (flight_id, row, seat) rejects the later commit.
async fn ensure_seats_free<C: ConnectionTrait>(db: &C, seats: &[SeatRequest]) -> AppResult<()> {
    let mut taken = Condition::any();
    for seat in seats {
        taken = taken.add(
            Condition::all()
                .add(TicketCol::FlightId.eq(seat.flight))
                .add(TicketCol::Row.eq(seat.row))
                .add(TicketCol::Seat.eq(seat.seat.as_str())),
        );
    }

    if let Some(existing) = Tickets::find().filter(taken).one(db).await? {
        return Err(AppError::Conflict(format!(
            "Seat {} on flight {} is already taken",
            existing.seat, existing.flight_id
        )));
    }
    Ok(())
}

/// Inserts an order for `user_id` and one ticket per seat. The caller owns
/// the transaction; a seat that is already sold surfaces as a conflict from
/// the unique index, whether or not the advisory seat check ran first.
pub async fn store_order<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    seats: Vec<SeatRequest>,
) -> AppResult<(orders::Model, Vec<Ticket>)> {
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    let mut tickets: Vec<Ticket> = Vec::with_capacity(seats.len());
    for seat in seats {
        let ticket = TicketActive {
            id: Set(Uuid::new_v4()),
            row: Set(seat.row),
            seat: Set(seat.seat),
            flight_id: Set(seat.flight),
            order_id: Set(order.id),
        }
        .insert(db)
        .await?;
        tickets.push(ticket.into());
    }
    Ok((order, tickets))
}

/// Creates an order owned by `user` together with all of its tickets.
///
/// Either every ticket is stored with the new order or nothing is: the whole
/// write runs in one transaction, and every ticket insert goes through the
/// entity's seat check before it reaches the database.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithTickets>> {
    check_ticket_requests(&payload.tickets)?;

    let txn = state.orm.begin().await?;

    let layouts = load_layouts(&txn, &payload.tickets).await?;
    let seats = seat_requests(&payload.tickets, &layouts)?;
    ensure_seats_free(&txn, &seats).await?;

    let (order, tickets) = store_order(&txn, user.user_id, seats).await?;

    txn.commit().await?;

    tracing::debug!(order_id = %order.id, tickets = tickets.len(), "order created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "tickets": tickets.len() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderWithTickets {
            order: Order::from(order),
            tickets,
        },
        Some(Meta::empty()),
    ))
}

async fn tickets_by_order<C: ConnectionTrait>(
    db: &C,
    order_ids: Vec<Uuid>,
) -> AppResult<Vec<tickets::Model>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    let tickets = Tickets::find()
        .filter(TicketCol::OrderId.is_in(order_ids))
        .order_by_asc(TicketCol::Row)
        .order_by_asc(TicketCol::Seat)
        .all(db)
        .await?;
    Ok(tickets)
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<Vec<OrderListItem>>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Orders::find().filter(scope_orders(user));
    finder = match query.sort_order.unwrap_or_default() {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await?;
    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let mut user_ids: Vec<Uuid> = orders.iter().map(|o| o.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let emails: HashMap<Uuid, String> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(UserCol::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|u| (u.id, u.email))
            .collect()
    };

    let tickets = tickets_by_order(&state.orm, orders.iter().map(|o| o.id).collect()).await?;
    let owners: Vec<Uuid> = tickets.iter().map(|t| t.order_id).collect();
    let mut grouped: HashMap<Uuid, Vec<_>> = HashMap::new();
    for (order_id, item) in owners
        .into_iter()
        .zip(ticket_list_items(&state.orm, tickets).await?)
    {
        grouped.entry(order_id).or_default().push(item);
    }

    let items = orders
        .into_iter()
        .map(|order| {
            let email = emails.get(&order.user_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("order {} has no user", order.id))
            })?;
            Ok(OrderListItem {
                id: order.id,
                created_at: order.created_at.with_timezone(&Utc),
                user: OrderUserSummary { email },
                tickets: grouped.remove(&order.id).unwrap_or_default(),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Orders",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

/// Another user's order is reported as missing, not forbidden.
pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    let (order, owner) = Orders::find_by_id(id)
        .filter(scope_orders(user))
        .find_also_related(Users)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let owner = owner
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("order {id} has no user")))?;

    let tickets = tickets_by_order(&state.orm, vec![order.id]).await?;
    let tickets = ticket_list_items(&state.orm, tickets).await?;

    let detail = OrderDetail {
        id: order.id,
        created_at: order.created_at.with_timezone(&Utc),
        user: OrderUserDetail {
            id: owner.id,
            is_staff: owner.role == ROLE_STAFF,
            email: owner.email,
        },
        tickets,
    };
    Ok(ApiResponse::success("OK", detail, Some(Meta::empty())))
}

/// Deletes the order and, through the foreign key cascade, its tickets.
pub async fn delete_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Orders::delete_many()
        .filter(OrderCol::Id.eq(id))
        .filter(scope_orders(user))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(flight: Uuid, row: i32, seat: &str) -> TicketRequest {
        TicketRequest {
            row,
            seat: seat.into(),
            flight,
        }
    }

    fn layout(flight: Uuid, rows: i32, seats_in_row: i32) -> HashMap<Uuid, airplanes::Model> {
        HashMap::from([(
            flight,
            airplanes::Model {
                id: Uuid::new_v4(),
                name: "Airplane 1".into(),
                rows,
                seats_in_row,
                airplane_type_id: Uuid::new_v4(),
            },
        )])
    }

    #[test]
    fn empty_orders_are_rejected() {
        match check_ticket_requests(&[]) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "tickets"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn same_seat_twice_in_one_order_is_rejected() {
        let flight = Uuid::new_v4();
        let requests = [request(flight, 10, "10A"), request(flight, 10, "10a")];
        assert!(check_ticket_requests(&requests).is_err());

        let other_flight = [request(flight, 10, "10A"), request(Uuid::new_v4(), 10, "10A")];
        assert!(check_ticket_requests(&other_flight).is_ok());
    }

    #[test]
    fn one_bad_seat_fails_the_whole_batch() {
        let flight = Uuid::new_v4();
        let layouts = layout(flight, 20, 6);
        let requests = [
            request(flight, 10, "10A"),
            request(flight, 11, "11B"),
            request(flight, 12, "12C"),
            request(flight, 10, "10G"),
        ];
        match seat_requests(&requests, &layouts) {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "seat");
                assert!(message.contains("10G"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn seats_are_canonicalized() {
        let flight = Uuid::new_v4();
        let layouts = layout(flight, 20, 6);
        let seats = seat_requests(&[request(flight, 3, "3c")], &layouts).unwrap();
        assert_eq!(
            seats,
            vec![SeatRequest {
                flight,
                row: 3,
                seat: "3C".into(),
            }]
        );
    }

    #[test]
    fn unknown_flights_are_reported_on_the_flight_field() {
        let layouts = layout(Uuid::new_v4(), 20, 6);
        match seat_requests(&[request(Uuid::new_v4(), 1, "1A")], &layouts) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "flight"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
