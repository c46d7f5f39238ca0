use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        airports::{CreateAirportRequest, UpdateAirportRequest},
        required_text,
    },
    entity::airports::{ActiveModel, Column, Entity as Airports},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Airport,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_airports(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Airport>>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Airports::find().order_by_asc(Column::Name);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Airport::from)
        .collect();

    Ok(ApiResponse::success(
        "Airports",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

pub async fn get_airport(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Airport>> {
    let airport = Airports::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Airport", airport.into(), None))
}

pub async fn create_airport(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirportRequest,
) -> AppResult<ApiResponse<Airport>> {
    let airport = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(required_text("name", &payload.name, 255)?),
        closest_big_city: Set(required_text(
            "closest_big_city",
            &payload.closest_big_city,
            255,
        )?),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "airport_create",
        "airports",
        serde_json::json!({ "airport_id": airport.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Airport created",
        airport.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_airport(
    state: &AppState,
    id: Uuid,
    payload: UpdateAirportRequest,
) -> AppResult<ApiResponse<Airport>> {
    let existing = Airports::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name, 255)?);
    }
    if let Some(city) = payload.closest_big_city {
        active.closest_big_city = Set(required_text("closest_big_city", &city, 255)?);
    }

    let airport = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        airport.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_airport(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Airports::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "airport_delete",
        "airports",
        serde_json::json!({ "airport_id": id }),
    )
    .await;
    Ok(())
}
