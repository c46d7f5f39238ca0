use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        crews::{CreateCrewRequest, UpdateCrewRequest},
        required_text,
    },
    entity::crews::{ActiveModel, Column, Entity as Crews},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Crew,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_crews(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Crew>>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Crews::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Crew::from)
        .collect();

    Ok(ApiResponse::success(
        "Crews",
        items,
        Some(Meta::paged(page, limit, total)),
    ))
}

pub async fn get_crew(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Crew>> {
    let crew = Crews::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Crew", crew.into(), None))
}

pub async fn create_crew(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCrewRequest,
) -> AppResult<ApiResponse<Crew>> {
    let crew = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(required_text("first_name", &payload.first_name, 255)?),
        last_name: Set(required_text("last_name", &payload.last_name, 255)?),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "crew_create",
        "crews",
        serde_json::json!({ "crew_id": crew.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Crew created",
        crew.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_crew(
    state: &AppState,
    id: Uuid,
    payload: UpdateCrewRequest,
) -> AppResult<ApiResponse<Crew>> {
    let existing = Crews::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(required_text("first_name", &first_name, 255)?);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(required_text("last_name", &last_name, 255)?);
    }

    let crew = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", crew.into(), Some(Meta::empty())))
}

pub async fn delete_crew(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Crews::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "crew_delete",
        "crews",
        serde_json::json!({ "crew_id": id }),
    )
    .await;
    Ok(())
}
