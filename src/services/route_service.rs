use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        positive,
        routes::{CreateRouteRequest, RouteDetail, RouteListItem, UpdateRouteRequest},
    },
    entity::{
        airports::{self, Column as AirportCol, Entity as Airports},
        routes::{self, ActiveModel, Column, Entity as Routes},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Route,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::missing_reference,
    state::AppState,
};

/// Airports referenced by `routes`, keyed by id.
pub(crate) async fn load_airports<C: ConnectionTrait>(
    db: &C,
    routes: &[routes::Model],
) -> AppResult<HashMap<Uuid, airports::Model>> {
    let mut ids: Vec<Uuid> = routes
        .iter()
        .flat_map(|r| [r.source_id, r.destination_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let airports = Airports::find()
        .filter(AirportCol::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(airports.into_iter().map(|a| (a.id, a)).collect())
}

fn airport<'a>(
    airports: &'a HashMap<Uuid, airports::Model>,
    id: Uuid,
) -> AppResult<&'a airports::Model> {
    airports
        .get(&id)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("route references missing airport {id}")))
}

pub(crate) fn route_list_item(
    route: &routes::Model,
    airports: &HashMap<Uuid, airports::Model>,
) -> AppResult<RouteListItem> {
    Ok(RouteListItem {
        id: route.id,
        source: airport(airports, route.source_id)?.name.clone(),
        destination: airport(airports, route.destination_id)?.name.clone(),
    })
}

pub(crate) fn route_detail(
    route: &routes::Model,
    airports: &HashMap<Uuid, airports::Model>,
) -> AppResult<RouteDetail> {
    let source = airport(airports, route.source_id)?;
    let destination = airport(airports, route.destination_id)?;
    Ok(RouteDetail {
        id: route.id,
        airport_of_departure: source.name.clone(),
        airport_of_arrival: destination.name.clone(),
        city_of_departure: source.closest_big_city.clone(),
        city_of_arrival: destination.closest_big_city.clone(),
        distance: route.distance,
    })
}

async fn ensure_airport<C: ConnectionTrait>(db: &C, field: &str, id: Uuid) -> AppResult<()> {
    if Airports::find_by_id(id).one(db).await?.is_none() {
        return Err(missing_reference(field, id));
    }
    Ok(())
}

pub async fn list_routes(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<RouteListItem>>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Routes::find().order_by_asc(Column::Distance).order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await?;
    let routes = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let airports = load_airports(&state.orm, &routes).await?;
    let items = routes
        .iter()
        .map(|route| route_list_item(route, &airports))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Routes",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

pub async fn get_route(state: &AppState, id: Uuid) -> AppResult<ApiResponse<RouteDetail>> {
    let route = Routes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let airports = load_airports(&state.orm, std::slice::from_ref(&route)).await?;
    Ok(ApiResponse::success(
        "Route",
        route_detail(&route, &airports)?,
        None,
    ))
}

/// Source and destination may be the same airport; nothing here forbids it.
pub async fn create_route(
    state: &AppState,
    user: &AuthUser,
    payload: CreateRouteRequest,
) -> AppResult<ApiResponse<Route>> {
    let distance = positive("distance", payload.distance)?;
    ensure_airport(&state.orm, "source", payload.source).await?;
    ensure_airport(&state.orm, "destination", payload.destination).await?;

    let route = ActiveModel {
        id: Set(Uuid::new_v4()),
        source_id: Set(payload.source),
        destination_id: Set(payload.destination),
        distance: Set(distance),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "route_create",
        "routes",
        serde_json::json!({ "route_id": route.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Route created",
        route.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_route(
    state: &AppState,
    id: Uuid,
    payload: UpdateRouteRequest,
) -> AppResult<ApiResponse<Route>> {
    let existing = Routes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(distance) = payload.distance {
        active.distance = Set(positive("distance", distance)?);
    }
    if let Some(source) = payload.source {
        ensure_airport(&state.orm, "source", source).await?;
        active.source_id = Set(source);
    }
    if let Some(destination) = payload.destination {
        ensure_airport(&state.orm, "destination", destination).await?;
        active.destination_id = Set(destination);
    }

    let route = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", route.into(), Some(Meta::empty())))
}

pub async fn delete_route(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Routes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "route_delete",
        "routes",
        serde_json::json!({ "route_id": id }),
    )
    .await;
    Ok(())
}
