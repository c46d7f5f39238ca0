use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        airplanes::{
            CreateAirplaneRequest, CreateAirplaneTypeRequest, UpdateAirplaneRequest,
            UpdateAirplaneTypeRequest, check_seats_in_row,
        },
        positive, required_text,
    },
    entity::{
        airplane_types::{
            ActiveModel as AirplaneTypeActive, Column as AirplaneTypeCol, Entity as AirplaneTypes,
        },
        airplanes::{ActiveModel as AirplaneActive, Column as AirplaneCol, Entity as Airplanes},
        flights::Column as FlightCol,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Airplane, AirplaneType},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{ensure_sold_seats_fit, missing_reference},
    state::AppState,
};

pub async fn list_airplane_types(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<AirplaneType>>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = AirplaneTypes::find().order_by_asc(AirplaneTypeCol::Name);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(AirplaneType::from)
        .collect();

    Ok(ApiResponse::success(
        "Airplane types",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

pub async fn get_airplane_type(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<AirplaneType>> {
    let airplane_type = AirplaneTypes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Airplane type", airplane_type.into(), None))
}

pub async fn create_airplane_type(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirplaneTypeRequest,
) -> AppResult<ApiResponse<AirplaneType>> {
    let airplane_type = AirplaneTypeActive {
        id: Set(Uuid::new_v4()),
        name: Set(required_text("name", &payload.name, 255)?),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "airplane_type_create",
        "airplane_types",
        serde_json::json!({ "airplane_type_id": airplane_type.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Airplane type created",
        airplane_type.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_airplane_type(
    state: &AppState,
    id: Uuid,
    payload: UpdateAirplaneTypeRequest,
) -> AppResult<ApiResponse<AirplaneType>> {
    let existing = AirplaneTypes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: AirplaneTypeActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name, 255)?);
    }

    let airplane_type = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        airplane_type.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_airplane_type(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = AirplaneTypes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "airplane_type_delete",
        "airplane_types",
        serde_json::json!({ "airplane_type_id": id }),
    )
    .await;
    Ok(())
}

async fn ensure_airplane_type<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<()> {
    if AirplaneTypes::find_by_id(id).one(db).await?.is_none() {
        return Err(missing_reference("airplane_type", id));
    }
    Ok(())
}

pub async fn list_airplanes(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Airplane>>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Airplanes::find().order_by_asc(AirplaneCol::Name);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Airplane::from)
        .collect();

    Ok(ApiResponse::success(
        "Airplanes",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

pub async fn get_airplane(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Airplane>> {
    let airplane = Airplanes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Airplane", airplane.into(), None))
}

pub async fn create_airplane(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirplaneRequest,
) -> AppResult<ApiResponse<Airplane>> {
    let name = required_text("name", &payload.name, 255)?;
    let rows = positive("rows", payload.rows)?;
    let seats_in_row = check_seats_in_row(payload.seats_in_row)?;
    ensure_airplane_type(&state.orm, payload.airplane_type).await?;

    let airplane = AirplaneActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        rows: Set(rows),
        seats_in_row: Set(seats_in_row),
        airplane_type_id: Set(payload.airplane_type),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "airplane_create",
        "airplanes",
        serde_json::json!({ "airplane_id": airplane.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Airplane created",
        airplane.into(),
        Some(Meta::empty()),
    ))
}

/// A new layout must still hold every ticket sold on this airplane's flights.
pub async fn update_airplane(
    state: &AppState,
    id: Uuid,
    payload: UpdateAirplaneRequest,
) -> AppResult<ApiResponse<Airplane>> {
    let existing = Airplanes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let rows = payload
        .rows
        .map(|rows| positive("rows", rows))
        .transpose()?;
    let seats_in_row = payload
        .seats_in_row
        .map(check_seats_in_row)
        .transpose()?;
    if rows.is_some_and(|rows| rows < existing.rows)
        || seats_in_row.is_some_and(|seats| seats < existing.seats_in_row)
    {
        ensure_sold_seats_fit(
            &state.orm,
            FlightCol::AirplaneId.eq(id),
            rows.unwrap_or(existing.rows),
            seats_in_row.unwrap_or(existing.seats_in_row),
        )
        .await?;
    }

    let mut active: AirplaneActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name, 255)?);
    }
    if let Some(rows) = rows {
        active.rows = Set(rows);
    }
    if let Some(seats_in_row) = seats_in_row {
        active.seats_in_row = Set(seats_in_row);
    }
    if let Some(airplane_type) = payload.airplane_type {
        ensure_airplane_type(&state.orm, airplane_type).await?;
        active.airplane_type_id = Set(airplane_type);
    }

    let airplane = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        airplane.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_airplane(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Airplanes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "airplane_delete",
        "airplanes",
        serde_json::json!({ "airplane_id": id }),
    )
    .await;
    Ok(())
}
