//! Booking against a real Postgres. Skipped unless TEST_DATABASE_URL or
//! DATABASE_URL is set. Every test creates its own users and flights, so the
//! tests can share a database and run in parallel.

use airport_api::{
    db::{create_pool, run_migrations},
    dto::{
        airplanes::{CreateAirplaneRequest, CreateAirplaneTypeRequest, UpdateAirplaneRequest},
        airports::CreateAirportRequest,
        flights::{CreateFlightRequest, FlightQuery, UpdateFlightRequest},
        orders::{CreateOrderRequest, TicketRequest},
        routes::CreateRouteRequest,
    },
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        flights::Entity as Flights,
        tickets::{ActiveModel as TicketActive, Column as TicketCol, Entity as Tickets},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{OrderListQuery, Pagination},
    services::{
        airplane_service, airport_service, flight_service,
        order_service::{self, SeatRequest},
        route_service, ticket_service,
    },
    state::{AppState, AuthSettings},
};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run booking tests.");
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    let state = AppState::new(
        pool,
        AuthSettings {
            jwt_secret: "booking-test-secret".into(),
            jwt_ttl_hours: 1,
        },
    );
    run_migrations(&state.orm).await?;
    Ok(Some(state))
}

async fn create_user(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(format!("{role}-{}@example.com", Uuid::new_v4())),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

/// A flight on a fresh route and airplane with the given layout.
async fn create_flight(
    state: &AppState,
    user: &AuthUser,
    rows: i32,
    seats_in_row: i32,
) -> anyhow::Result<Uuid> {
    let mut airports = Vec::new();
    for (name, city) in [("Boryspil", "Kyiv"), ("Schiphol", "Amsterdam")] {
        let airport = airport_service::create_airport(
            state,
            user,
            CreateAirportRequest {
                name: name.into(),
                closest_big_city: city.into(),
            },
        )
        .await?;
        airports.push(airport.data.unwrap().id);
    }

    let route = route_service::create_route(
        state,
        user,
        CreateRouteRequest {
            source: airports[0],
            destination: airports[1],
            distance: 1800,
        },
    )
    .await?
    .data
    .unwrap();

    let airplane_type = airplane_service::create_airplane_type(
        state,
        user,
        CreateAirplaneTypeRequest {
            name: "Narrow body".into(),
        },
    )
    .await?
    .data
    .unwrap();

    let airplane = airplane_service::create_airplane(
        state,
        user,
        CreateAirplaneRequest {
            name: "Airplane 1".into(),
            rows,
            seats_in_row,
            airplane_type: airplane_type.id,
        },
    )
    .await?
    .data
    .unwrap();

    let code = format!("T{}", &Uuid::new_v4().simple().to_string()[..6]).to_uppercase();
    let departure = Utc::now() + Duration::days(7);
    let flight = flight_service::create_flight(
        state,
        user,
        CreateFlightRequest {
            code,
            route: route.id,
            airplane: airplane.id,
            departure_time: departure,
            arrival_time: departure + Duration::hours(3),
        },
    )
    .await?
    .data
    .unwrap();

    Ok(flight.id)
}

fn ticket(flight: Uuid, row: i32, seat: &str) -> TicketRequest {
    TicketRequest {
        row,
        seat: seat.into(),
        flight,
    }
}

async fn order_count(state: &AppState, user: &AuthUser) -> anyhow::Result<u64> {
    Ok(Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .count(&state.orm)
        .await?)
}

async fn ticket_count(state: &AppState, flight: Uuid) -> anyhow::Result<u64> {
    Ok(Tickets::find()
        .filter(TicketCol::FlightId.eq(flight))
        .count(&state.orm)
        .await?)
}

#[tokio::test]
async fn order_with_one_bad_seat_stores_nothing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 20, 6).await?;

    let result = order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![
                ticket(flight, 10, "10A"),
                ticket(flight, 11, "11B"),
                ticket(flight, 12, "12C"),
                ticket(flight, 10, "10G"),
            ],
        },
    )
    .await;

    match result {
        Err(AppError::Validation { field, message }) => {
            assert_eq!(field, "seat");
            assert!(message.contains("first 6 letters"), "{message}");
        }
        other => panic!("expected a seat validation error, got {other:?}"),
    }
    assert_eq!(order_count(&state, &user).await?, 0);
    assert_eq!(ticket_count(&state, flight).await?, 0);
    Ok(())
}

#[tokio::test]
async fn seats_follow_the_airplane_layout() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 20, 6).await?;

    for (row, seat) in [(10, "10G"), (10, "11A"), (21, "21A"), (-1, "-1A"), (10, "A10")] {
        let result = order_service::create_order(
            &state,
            &user,
            CreateOrderRequest {
                tickets: vec![ticket(flight, row, seat)],
            },
        )
        .await;
        assert!(
            matches!(result, Err(AppError::Validation { .. })),
            "{row}/{seat} should be rejected"
        );
    }

    let created = order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 10, "10f"), ticket(flight, 20, "20A")],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(created.order.user, user.user_id);
    let seats: Vec<&str> = created.tickets.iter().map(|t| t.seat.as_str()).collect();
    assert_eq!(seats, ["10F", "20A"]);
    Ok(())
}

#[tokio::test]
async fn taken_seats_conflict_and_availability_adds_up() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let other = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 20, 6).await?;

    order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 1, "1A"), ticket(flight, 1, "1B")],
        },
    )
    .await?;

    let clash = order_service::create_order(
        &state,
        &other,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 2, "2A"), ticket(flight, 1, "1a")],
        },
    )
    .await;
    assert!(matches!(clash, Err(AppError::Conflict(_))), "{clash:?}");
    assert_eq!(order_count(&state, &other).await?, 0);

    let detail = flight_service::get_flight(&state, flight).await?.data.unwrap();
    assert_eq!(detail.taken_seats, 2);
    assert_eq!(detail.available_seats + detail.taken_seats, 120);
    Ok(())
}

#[tokio::test]
async fn unique_index_rejects_a_sold_seat_inside_the_order_transaction() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let other = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 20, 6).await?;

    order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 1, "1A")],
        },
    )
    .await?;
    let sold = ticket_count(&state, flight).await?;

    // Same writes as an order whose advisory check raced with the first sale.
    let seat = |row: i32, seat: &str| SeatRequest {
        flight,
        row,
        seat: seat.into(),
    };
    let txn = state.orm.begin().await?;
    let result = order_service::store_order(
        &txn,
        other.user_id,
        vec![seat(2, "2A"), seat(2, "2B"), seat(1, "1A")],
    )
    .await;
    assert!(matches!(result, Err(AppError::Conflict(_))), "{result:?}");
    drop(txn);

    assert_eq!(order_count(&state, &other).await?, 0);
    assert_eq!(ticket_count(&state, flight).await?, sold);
    Ok(())
}

#[tokio::test]
async fn layout_changes_cannot_strand_sold_seats() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 20, 6).await?;
    let airplane = Flights::find_by_id(flight)
        .one(&state.orm)
        .await?
        .unwrap()
        .airplane_id;

    order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 15, "15E")],
        },
    )
    .await?;

    let shrink = |rows: Option<i32>, seats_in_row: Option<i32>| UpdateAirplaneRequest {
        name: None,
        rows,
        seats_in_row,
        airplane_type: None,
    };
    for (rows, seats) in [(Some(10), None), (None, Some(4))] {
        let result = airplane_service::update_airplane(&state, airplane, shrink(rows, seats)).await;
        match result {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "non_field_errors");
                assert!(message.contains("15E"), "{message}");
            }
            other => panic!("expected a layout error, got {other:?}"),
        }
    }

    let resized = airplane_service::update_airplane(&state, airplane, shrink(Some(15), Some(5)))
        .await?
        .data
        .unwrap();
    assert_eq!((resized.rows, resized.seats_in_row), (15, 5));

    // A smaller airplane cannot take over the flight either.
    let small_flight = create_flight(&state, &user, 5, 2).await?;
    let small_airplane = Flights::find_by_id(small_flight)
        .one(&state.orm)
        .await?
        .unwrap()
        .airplane_id;
    let result = flight_service::update_flight(
        &state,
        flight,
        UpdateFlightRequest {
            airplane: Some(small_airplane),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation { .. })), "{result:?}");
    Ok(())
}

#[tokio::test]
async fn orders_and_tickets_are_scoped_to_their_owner() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let alice = create_user(&state, "user").await?;
    let bob = create_user(&state, "user").await?;
    let staff = create_user(&state, "staff").await?;
    let flight = create_flight(&state, &staff, 10, 4).await?;

    let alice_order = order_service::create_order(
        &state,
        &alice,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 3, "3C")],
        },
    )
    .await?
    .data
    .unwrap()
    .order;
    order_service::create_order(
        &state,
        &bob,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 4, "4D")],
        },
    )
    .await?;

    let listed = order_service::list_orders(&state, &alice, OrderListQuery::default())
        .await?
        .data
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, alice_order.id);
    assert_eq!(listed[0].tickets.len(), 1);
    assert_eq!(listed[0].tickets[0].seat, "3C");

    let tickets = ticket_service::list_tickets(&state, &bob, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].seat, "4D");

    assert!(matches!(
        order_service::get_order(&state, &bob, alice_order.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        order_service::delete_order(&state, &bob, alice_order.id).await,
        Err(AppError::NotFound)
    ));

    let seen_by_staff = order_service::get_order(&state, &staff, alice_order.id)
        .await?
        .data
        .unwrap();
    assert!(!seen_by_staff.user.is_staff);
    assert_eq!(seen_by_staff.tickets.len(), 1);

    // Retrieval has no side effects.
    let again = order_service::get_order(&state, &staff, alice_order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(again.id, seen_by_staff.id);
    assert_eq!(again.tickets[0].id, seen_by_staff.tickets[0].id);

    order_service::delete_order(&state, &alice, alice_order.id).await?;
    assert_eq!(order_count(&state, &alice).await?, 0);
    assert_eq!(ticket_count(&state, flight).await?, 1);
    Ok(())
}

#[tokio::test]
async fn direct_ticket_inserts_are_checked_too() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 20, 6).await?;
    let order = order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![ticket(flight, 5, "5A")],
        },
    )
    .await?
    .data
    .unwrap()
    .order;

    let err = TicketActive {
        id: Set(Uuid::new_v4()),
        row: Set(10),
        seat: Set("10G".into()),
        flight_id: Set(flight),
        order_id: Set(order.id),
    }
    .insert(&state.orm)
    .await
    .unwrap_err();
    assert!(matches!(AppError::from(err), AppError::Validation { .. }));
    assert_eq!(ticket_count(&state, flight).await?, 1);
    Ok(())
}

#[tokio::test]
async fn flights_filter_by_code_case_insensitively() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let flight = create_flight(&state, &user, 10, 4).await?;
    let code = flight_service::get_flight(&state, flight)
        .await?
        .data
        .unwrap()
        .code;

    let listed = flight_service::list_flights(
        &state,
        FlightQuery {
            code: Some(code[1..].to_lowercase()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert!(listed.iter().any(|f| f.id == flight));
    assert!(listed.iter().all(|f| f.code.contains(&code[1..])));
    assert_eq!(listed[0].city_of_departure, "Kyiv");
    Ok(())
}
