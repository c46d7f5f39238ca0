use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    booking::{SeatAvailability, scope::flight_code_filter},
    dto::flights::{
        CreateFlightRequest, FlightDetail, FlightListItem, FlightQuery, UpdateFlightRequest,
        check_code, check_schedule,
    },
    entity::{
        airplanes::Entity as Airplanes,
        flights::{ActiveModel, Column, Entity as Flights},
        routes::{self, Column as RouteCol, Entity as Routes},
        tickets::{Column as TicketCol, Entity as Tickets},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Flight,
    response::{ApiResponse, Meta},
    services::{
        ensure_sold_seats_fit, missing_reference,
        route_service::{load_airports, route_detail},
    },
    state::AppState,
};

pub async fn list_flights(
    state: &AppState,
    query: FlightQuery,
) -> AppResult<ApiResponse<Vec<FlightListItem>>> {
    let (page, limit, offset) = query.pagination().normalize();
    let finder = Flights::find()
        .filter(flight_code_filter(query.code.as_deref()))
        .order_by_asc(Column::DepartureTime);

    let total = finder.clone().count(&state.orm).await?;
    let rows = finder
        .find_also_related(Airplanes)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let mut route_ids: Vec<Uuid> = rows.iter().map(|(f, _)| f.route_id).collect();
    route_ids.sort_unstable();
    route_ids.dedup();
    let routes: Vec<routes::Model> = if route_ids.is_empty() {
        Vec::new()
    } else {
        Routes::find()
            .filter(RouteCol::Id.is_in(route_ids))
            .all(&state.orm)
            .await?
    };
    let airports = load_airports(&state.orm, &routes).await?;
    let routes: HashMap<Uuid, routes::Model> = routes.into_iter().map(|r| (r.id, r)).collect();

    let mut items = Vec::with_capacity(rows.len());
    for (flight, airplane) in rows {
        let airplane = airplane.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("flight {} has no airplane", flight.id))
        })?;
        let route = routes.get(&flight.route_id).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("flight {} has no route", flight.id))
        })?;
        let route = route_detail(route, &airports)?;
        items.push(FlightListItem {
            id: flight.id,
            code: flight.code,
            city_of_departure: route.city_of_departure,
            city_of_arrival: route.city_of_arrival,
            departure_time: flight.departure_time.with_timezone(&Utc),
            arrival_time: flight.arrival_time.with_timezone(&Utc),
            airplane: airplane.name,
        });
    }

    Ok(ApiResponse::success(
        "Flights",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

/// Single flight with its route and live seat counts.
pub async fn get_flight(state: &AppState, id: Uuid) -> AppResult<ApiResponse<FlightDetail>> {
    let (flight, airplane) = Flights::find_by_id(id)
        .find_also_related(Airplanes)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let airplane = airplane
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("flight {id} has no airplane")))?;

    let route = Routes::find_by_id(flight.route_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("flight {id} has no route")))?;
    let airports = load_airports(&state.orm, std::slice::from_ref(&route)).await?;

    let taken = Tickets::find()
        .filter(TicketCol::FlightId.eq(flight.id))
        .count(&state.orm)
        .await?;
    let seats = SeatAvailability::compute(airplane.rows, airplane.seats_in_row, taken);

    let detail = FlightDetail {
        id: flight.id,
        code: flight.code,
        available_seats: seats.available_seats,
        taken_seats: seats.taken_seats,
        departure_time: flight.departure_time.with_timezone(&Utc),
        arrival_time: flight.arrival_time.with_timezone(&Utc),
        airplane: flight.airplane_id,
        route: route_detail(&route, &airports)?,
    };
    Ok(ApiResponse::success("Flight", detail, None))
}

async fn ensure_references<C: ConnectionTrait>(
    db: &C,
    route: Option<Uuid>,
    airplane: Option<Uuid>,
) -> AppResult<()> {
    if let Some(route) = route {
        if Routes::find_by_id(route).one(db).await?.is_none() {
            return Err(missing_reference("route", route));
        }
    }
    if let Some(airplane) = airplane {
        if Airplanes::find_by_id(airplane).one(db).await?.is_none() {
            return Err(missing_reference("airplane", airplane));
        }
    }
    Ok(())
}

pub async fn create_flight(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFlightRequest,
) -> AppResult<ApiResponse<Flight>> {
    let code = check_code(&payload.code)?;
    check_schedule(payload.departure_time, payload.arrival_time)?;
    ensure_references(&state.orm, Some(payload.route), Some(payload.airplane)).await?;

    let flight = ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code),
        route_id: Set(payload.route),
        airplane_id: Set(payload.airplane),
        departure_time: Set(payload.departure_time.into()),
        arrival_time: Set(payload.arrival_time.into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "flight_create",
        "flights",
        serde_json::json!({ "flight_id": flight.id, "code": flight.code }),
    )
    .await;

    Ok(ApiResponse::success(
        "Flight created",
        flight.into(),
        Some(Meta::empty()),
    ))
}

/// The schedule is re-checked on the merged values, so moving only one end
/// of the flight past the other is rejected too. Switching airplanes is
/// refused when a sold seat does not exist on the new one.
pub async fn update_flight(
    state: &AppState,
    id: Uuid,
    payload: UpdateFlightRequest,
) -> AppResult<ApiResponse<Flight>> {
    let code = payload.code.as_deref().map(check_code).transpose()?;
    if let (Some(departure), Some(arrival)) = (payload.departure_time, payload.arrival_time) {
        check_schedule(departure, arrival)?;
    }

    let existing = Flights::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let departure = payload
        .departure_time
        .unwrap_or_else(|| existing.departure_time.with_timezone(&Utc));
    let arrival = payload
        .arrival_time
        .unwrap_or_else(|| existing.arrival_time.with_timezone(&Utc));
    check_schedule(departure, arrival)?;
    ensure_references(&state.orm, payload.route, payload.airplane).await?;
    if let Some(airplane_id) = payload.airplane.filter(|a| *a != existing.airplane_id) {
        let airplane = Airplanes::find_by_id(airplane_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| missing_reference("airplane", airplane_id))?;
        ensure_sold_seats_fit(
            &state.orm,
            TicketCol::FlightId.eq(id),
            airplane.rows,
            airplane.seats_in_row,
        )
        .await?;
    }

    let mut active: ActiveModel = existing.into();
    if let Some(code) = code {
        active.code = Set(code);
    }
    if let Some(route) = payload.route {
        active.route_id = Set(route);
    }
    if let Some(airplane) = payload.airplane {
        active.airplane_id = Set(airplane);
    }
    if payload.departure_time.is_some() {
        active.departure_time = Set(departure.into());
    }
    if payload.arrival_time.is_some() {
        active.arrival_time = Set(arrival.into());
    }

    let flight = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        flight.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_flight(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Flights::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "flight_delete",
        "flights",
        serde_json::json!({ "flight_id": id }),
    )
    .await;
    Ok(())
}
