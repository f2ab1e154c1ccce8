use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use homeserve_core::{
    catalog::CatalogFilter,
    errors::MarketError,
    models::service::{CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest},
    models::user::UserRole,
};
use homeserve_db::models::DbService;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Query parameters for the catalog listing. `category`, `min_price`,
/// `max_price`, and `search` combine into a [`CatalogFilter`]; unset fields
/// pass everything through.
#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
}

pub(crate) fn service_from_db(db_service: DbService) -> Result<Service, MarketError> {
    let category = ServiceCategory::parse(&db_service.category).ok_or_else(|| {
        MarketError::Database(eyre::eyre!("Unknown category stored: {}", db_service.category))
    })?;

    Ok(Service {
        id: db_service.id,
        name: db_service.name,
        category,
        description: db_service.description,
        price: db_service.price,
        duration_hours: db_service.duration_hours,
        image_url: db_service.image_url,
        created_at: db_service.created_at,
        updated_at: db_service.updated_at,
    })
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let category = match query.category.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(ServiceCategory::parse(raw).ok_or_else(|| {
            MarketError::Validation(format!("Unknown service category: {}", raw))
        })?),
    };

    let filter = CatalogFilter {
        category,
        min_price: query.min_price,
        max_price: query.max_price,
        search_term: query.search,
    };

    let db_services = homeserve_db::repositories::service::list_services(&state.db_pool)
        .await
        .map_err(MarketError::Database)?;

    let services = db_services
        .into_iter()
        .map(service_from_db)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(filter.apply(&services)))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let db_service = homeserve_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(service_from_db(db_service)?))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Admin)?;

    if payload.name.trim().is_empty() {
        return Err(AppError(MarketError::Validation(
            "A service name is required".to_string(),
        )));
    }
    if payload.price <= 0.0 {
        return Err(AppError(MarketError::Validation(
            "The price must be positive".to_string(),
        )));
    }
    if payload.duration_hours <= 0 {
        return Err(AppError(MarketError::Validation(
            "The duration must be a positive number of hours".to_string(),
        )));
    }

    let db_service = homeserve_db::repositories::service::create_service(
        &state.db_pool,
        payload.name.trim(),
        payload.category.as_str(),
        payload.description.as_deref(),
        payload.price,
        payload.duration_hours,
        payload.image_url.as_deref(),
    )
    .await
    .map_err(MarketError::Database)?;

    Ok(Json(service_from_db(db_service)?))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Admin)?;

    // The row must exist before an update is attempted
    homeserve_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound(format!("Service with ID {} not found", id)))?;

    if payload.price.is_some_and(|price| price <= 0.0) {
        return Err(AppError(MarketError::Validation(
            "The price must be positive".to_string(),
        )));
    }
    if payload.duration_hours.is_some_and(|duration| duration <= 0) {
        return Err(AppError(MarketError::Validation(
            "The duration must be a positive number of hours".to_string(),
        )));
    }

    let db_service = homeserve_db::repositories::service::update_service(
        &state.db_pool,
        id,
        payload.name.as_deref(),
        payload.category.map(|category| category.as_str()),
        payload.description.as_deref(),
        payload.price,
        payload.duration_hours,
        payload.image_url.as_deref(),
    )
    .await
    .map_err(MarketError::Database)?;

    Ok(Json(service_from_db(db_service)?))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    auth::require_role(&session, UserRole::Admin)?;

    homeserve_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound(format!("Service with ID {} not found", id)))?;

    homeserve_db::repositories::service::delete_service(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?;

    Ok(StatusCode::NO_CONTENT)
}
