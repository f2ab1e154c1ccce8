use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use homeserve_core::{
    errors::MarketError,
    models::availability::{Weekday, WeeklyAvailability},
    models::provider::{GetAvailabilityResponse, UpsertAvailabilityRequest},
    models::user::UserRole,
    slots,
};
use homeserve_db::models::DbAvailabilityDay;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Expands persisted per-day hour ranges into the weekly slot-label map the
/// booking flow consumes. Each day's set is the canonical grid for its
/// stored open/close range.
pub(crate) fn weekly_availability_from_rows(
    rows: Vec<DbAvailabilityDay>,
) -> Result<WeeklyAvailability, MarketError> {
    let mut availability = WeeklyAvailability::new();

    for row in rows {
        let day = Weekday::parse(&row.day_of_week).ok_or_else(|| {
            MarketError::Database(eyre::eyre!("Unknown weekday stored: {}", row.day_of_week))
        })?;
        let labels =
            slots::generate_time_slots(row.open_hour.max(0) as u32, row.close_hour.max(0) as u32);
        availability.set_day(day, labels);
    }

    Ok(availability)
}

#[axum::debug_handler]
pub async fn get_my_availability(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Provider)?;

    let rows =
        homeserve_db::repositories::availability::get_availability(&state.db_pool, session.user_id)
            .await
            .map_err(MarketError::Database)?;

    Ok(Json(GetAvailabilityResponse {
        availability: weekly_availability_from_rows(rows)?,
    }))
}

#[axum::debug_handler]
pub async fn upsert_my_availability(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<UpsertAvailabilityRequest>,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Provider)?;

    let day = Weekday::parse(&payload.day)
        .ok_or_else(|| MarketError::Validation(format!("Unknown weekday: {}", payload.day)))?;
    if payload.end > 24 || payload.start >= payload.end {
        return Err(AppError(MarketError::Validation(
            "The opening hour must come before the closing hour, within 0-24".to_string(),
        )));
    }

    homeserve_db::repositories::availability::upsert_day(
        &state.db_pool,
        session.user_id,
        day.as_str(),
        payload.start as i32,
        payload.end as i32,
    )
    .await
    .map_err(MarketError::Database)?;

    let rows =
        homeserve_db::repositories::availability::get_availability(&state.db_pool, session.user_id)
            .await
            .map_err(MarketError::Database)?;

    Ok(Json(GetAvailabilityResponse {
        availability: weekly_availability_from_rows(rows)?,
    }))
}

#[axum::debug_handler]
pub async fn delete_my_availability_day(
    State(state): State<Arc<ApiState>>,
    Path(day): Path<String>,
    headers: HeaderMap,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Provider)?;

    let day = Weekday::parse(&day)
        .ok_or_else(|| MarketError::Validation(format!("Unknown weekday: {}", day)))?;

    homeserve_db::repositories::availability::delete_day(
        &state.db_pool,
        session.user_id,
        day.as_str(),
    )
    .await
    .map_err(MarketError::Database)?;

    let rows =
        homeserve_db::repositories::availability::get_availability(&state.db_pool, session.user_id)
            .await
            .map_err(MarketError::Database)?;

    Ok(Json(GetAvailabilityResponse {
        availability: weekly_availability_from_rows(rows)?,
    }))
}
