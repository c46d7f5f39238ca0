//! Fills an empty database with a small, deterministic sample schedule:
//! five airports on a chain of routes, a handful of airplanes and flights,
//! one staff account, five passengers and some booked tickets.

use airport_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, create_pool, run_migrations},
    entity::{
        airplane_types::ActiveModel as AirplaneTypeActive,
        airplanes::{ActiveModel as AirplaneActive, Model as AirplaneModel},
        airports::{ActiveModel as AirportActive, Entity as Airports},
        crews::ActiveModel as CrewActive,
        flights::{ActiveModel as FlightActive, Model as FlightModel},
        orders::ActiveModel as OrderActive,
        routes::{ActiveModel as RouteActive, Model as RouteModel},
        tickets::ActiveModel as TicketActive,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    middleware::auth::{ROLE_STAFF, ROLE_USER},
    services::auth_service::hash_password,
};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

const AIRPORTS: [(&str, &str); 5] = [
    ("John F Kennedy", "New York"),
    ("LAX", "Los Angeles"),
    ("Heathrow", "London"),
    ("Narita", "Tokyo"),
    ("Charles de Gaulle", "Paris"),
];
const CREW_NAMES: [&str; 8] = ["John", "Jane", "Paul", "Anna", "Mike", "Sara", "Tom", "Eva"];
const SEAT_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    let orm = create_orm_conn(pool);
    run_migrations(&orm).await?;

    let staff_id = ensure_user(&orm, "staff@example.com", "staffpass123", ROLE_STAFF).await?;
    let mut passengers = Vec::new();
    for i in 1..=5 {
        let email = format!("user{i}@example.com");
        passengers.push(ensure_user(&orm, &email, "password123", ROLE_USER).await?);
    }

    if Airports::find().count(&orm).await? > 0 {
        println!("Reference data already present, skipping schedule seed");
    } else {
        seed_schedule(&orm, &passengers).await?;
    }

    println!("Seed completed. Staff ID: {staff_id}");
    Ok(())
}

async fn ensure_user(
    orm: &OrmConn,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role.to_string()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

async fn seed_schedule(orm: &OrmConn, passengers: &[Uuid]) -> anyhow::Result<()> {
    let txn = orm.begin().await?;

    let mut airport_ids = Vec::with_capacity(AIRPORTS.len());
    for (name, city) in AIRPORTS {
        let airport = AirportActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            closest_big_city: Set(city.to_string()),
        }
        .insert(&txn)
        .await?;
        airport_ids.push(airport.id);
    }
    println!("Created {} airports.", airport_ids.len());

    let mut routes: Vec<RouteModel> = Vec::new();
    for (i, pair) in airport_ids.windows(2).enumerate() {
        let route = RouteActive {
            id: Set(Uuid::new_v4()),
            source_id: Set(pair[0]),
            destination_id: Set(pair[1]),
            distance: Set(1_200 + 2_350 * i as i32),
        }
        .insert(&txn)
        .await?;
        routes.push(route);
    }
    println!("Created {} routes.", routes.len());

    let mut type_ids = Vec::new();
    for i in 1..=3 {
        let airplane_type = AirplaneTypeActive {
            id: Set(Uuid::new_v4()),
            name: Set(format!("Type-{i}")),
        }
        .insert(&txn)
        .await?;
        type_ids.push(airplane_type.id);
    }

    let mut airplanes: Vec<AirplaneModel> = Vec::new();
    for i in 0..5 {
        let airplane = AirplaneActive {
            id: Set(Uuid::new_v4()),
            name: Set(format!("Airplane-{}", i + 1)),
            rows: Set(10 + 5 * i as i32),
            seats_in_row: Set(4 + i as i32),
            airplane_type_id: Set(type_ids[i % type_ids.len()]),
        }
        .insert(&txn)
        .await?;
        airplanes.push(airplane);
    }
    println!("Created {} airplanes.", airplanes.len());

    let now = Utc::now();
    let mut flights: Vec<(FlightModel, &AirplaneModel)> = Vec::new();
    for i in 0..10_usize {
        let airplane = &airplanes[i % airplanes.len()];
        let departure = now + Duration::days(1 + i as i64 * 3);
        let flight = FlightActive {
            id: Set(Uuid::new_v4()),
            code: Set(format!("FL{:04}", 100 + i * 37)),
            route_id: Set(routes[i % routes.len()].id),
            airplane_id: Set(airplane.id),
            departure_time: Set(departure.into()),
            arrival_time: Set((departure + Duration::hours(3 + i as i64)).into()),
        }
        .insert(&txn)
        .await?;
        flights.push((flight, airplane));
    }
    println!("Created {} flights.", flights.len());

    for i in 0..5 {
        CrewActive {
            id: Set(Uuid::new_v4()),
            first_name: Set(CREW_NAMES[i].to_string()),
            last_name: Set(CREW_NAMES[(i + 3) % CREW_NAMES.len()].to_string()),
        }
        .insert(&txn)
        .await?;
    }
    println!("Created 5 crew members.");

    let mut order_ids = Vec::new();
    for i in 0..10 {
        let order = OrderActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(passengers[i % passengers.len()]),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;
        order_ids.push(order.id);
    }
    println!("Created {} orders.", order_ids.len());

    // Ticket inserts go through the entity seat check like any other booking.
    for i in 0..20_usize {
        let (flight, airplane) = &flights[i % flights.len()];
        let row = 1 + (i as i32 * 7) % airplane.rows;
        let letter = SEAT_LETTERS[i % airplane.seats_in_row as usize] as char;
        TicketActive {
            id: Set(Uuid::new_v4()),
            row: Set(row),
            seat: Set(format!("{row}{letter}")),
            flight_id: Set(flight.id),
            order_id: Set(order_ids[i % order_ids.len()]),
        }
        .insert(&txn)
        .await?;
    }
    println!("Created 20 tickets.");

    txn.commit().await?;
    Ok(())
}
