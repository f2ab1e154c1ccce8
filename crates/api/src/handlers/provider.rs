use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use homeserve_core::{
    errors::MarketError,
    models::provider::{GetProviderResponse, ProviderResponse, UpdateProviderProfileRequest},
    models::service::ServiceCategory,
    models::user::UserRole,
};

use crate::{
    handlers::availability::weekly_availability_from_rows,
    middleware::{auth, error_handling::AppError},
    ApiState,
};

fn categories_from_db(raw: Vec<String>) -> Result<Vec<ServiceCategory>, MarketError> {
    raw.iter()
        .map(|category| {
            ServiceCategory::parse(category).ok_or_else(|| {
                MarketError::Database(eyre::eyre!("Unknown category stored: {}", category))
            })
        })
        .collect()
}

#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ProviderResponse>>, AppError> {
    let listings = homeserve_db::repositories::provider::list_providers(&state.db_pool)
        .await
        .map_err(MarketError::Database)?;

    let mut providers = Vec::with_capacity(listings.len());
    for listing in listings {
        let categories =
            homeserve_db::repositories::provider::get_categories(&state.db_pool, listing.id)
                .await
                .map_err(MarketError::Database)?;

        providers.push(ProviderResponse {
            id: listing.id,
            name: listing.name,
            bio: listing.bio,
            hourly_rate: listing.hourly_rate,
            rating: listing.rating,
            completed_jobs: listing.completed_jobs,
            categories: categories_from_db(categories)?,
        });
    }

    Ok(Json(providers))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetProviderResponse>, AppError> {
    let listing = homeserve_db::repositories::provider::get_provider_by_id(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound(format!("Provider with ID {} not found", id)))?;

    let categories = homeserve_db::repositories::provider::get_categories(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?;

    let rows = homeserve_db::repositories::availability::get_availability(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?;

    Ok(Json(GetProviderResponse {
        id: listing.id,
        name: listing.name,
        bio: listing.bio,
        hourly_rate: listing.hourly_rate,
        rating: listing.rating,
        completed_jobs: listing.completed_jobs,
        categories: categories_from_db(categories)?,
        availability: weekly_availability_from_rows(rows)?,
    }))
}

#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProviderProfileRequest>,
) -> Result<Json<ProviderResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Provider)?;

    if payload.hourly_rate.is_some_and(|rate| rate < 0.0) {
        return Err(AppError(MarketError::Validation(
            "The hourly rate cannot be negative".to_string(),
        )));
    }

    homeserve_db::repositories::provider::upsert_profile(
        &state.db_pool,
        session.user_id,
        payload.bio.as_deref(),
        payload.hourly_rate,
    )
    .await
    .map_err(MarketError::Database)?;

    if let Some(categories) = &payload.categories {
        let raw: Vec<String> = categories
            .iter()
            .map(|category| category.as_str().to_string())
            .collect();
        homeserve_db::repositories::provider::set_categories(&state.db_pool, session.user_id, &raw)
            .await
            .map_err(MarketError::Database)?;
    }

    let listing =
        homeserve_db::repositories::provider::get_provider_by_id(&state.db_pool, session.user_id)
            .await
            .map_err(MarketError::Database)?
            .ok_or_else(|| MarketError::NotFound("Provider profile not found".to_string()))?;

    let categories =
        homeserve_db::repositories::provider::get_categories(&state.db_pool, session.user_id)
            .await
            .map_err(MarketError::Database)?;

    Ok(Json(ProviderResponse {
        id: listing.id,
        name: listing.name,
        bio: listing.bio,
        hourly_rate: listing.hourly_rate,
        rating: listing.rating,
        completed_jobs: listing.completed_jobs,
        categories: categories_from_db(categories)?,
    }))
}
