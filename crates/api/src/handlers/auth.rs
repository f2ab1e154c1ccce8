use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use std::sync::Arc;

use homeserve_core::{
    errors::MarketError,
    models::user::{AuthResponse, LoginRequest, RegisterRequest, UserResponse, UserRole},
    wizard,
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    // Validate the registration fields
    if payload.name.trim().is_empty() {
        return Err(AppError(MarketError::Validation(
            "A name is required".to_string(),
        )));
    }
    if !wizard::is_valid_email(&payload.email) {
        return Err(AppError(MarketError::Validation(
            "A valid email address is required".to_string(),
        )));
    }
    if payload.password.len() < 8 {
        return Err(AppError(MarketError::Validation(
            "The password must be at least 8 characters".to_string(),
        )));
    }

    // Accounts register as clients or providers; admin accounts are provisioned separately
    let role = payload.role.unwrap_or(UserRole::Client);
    if role == UserRole::Admin {
        return Err(AppError(MarketError::Authorization(
            "Admin accounts cannot be self-registered".to_string(),
        )));
    }

    let existing = homeserve_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(MarketError::Database)?;
    if existing.is_some() {
        return Err(AppError(MarketError::Validation(
            "An account with this email already exists".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let db_user = homeserve_db::repositories::user::create_user(
        &state.db_pool,
        payload.name.trim(),
        &payload.email,
        &password_hash,
        role.as_str(),
        payload.phone.as_deref(),
        payload.address.as_deref(),
    )
    .await
    .map_err(MarketError::Database)?;

    // Providers get an empty profile to fill in from their dashboard
    if role == UserRole::Provider {
        homeserve_db::repositories::provider::upsert_profile(&state.db_pool, db_user.id, None, None)
            .await
            .map_err(MarketError::Database)?;
    }

    let token = auth::generate_session_token();
    homeserve_db::repositories::user::create_session(&state.db_pool, &token, db_user.id)
        .await
        .map_err(MarketError::Database)?;

    let response = AuthResponse {
        token,
        user: UserResponse {
            id: db_user.id,
            name: db_user.name,
            email: db_user.email,
            role,
            phone: db_user.phone,
            address: db_user.address,
            avatar_url: db_user.avatar_url,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let db_user = homeserve_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::Authentication("Invalid email or password".to_string()))?;

    let is_valid = auth::verify_password(&payload.password, &db_user.password_hash)
        .map_err(MarketError::Database)?;
    if !is_valid {
        return Err(AppError(MarketError::Authentication(
            "Invalid email or password".to_string(),
        )));
    }

    let role = UserRole::parse(&db_user.role)
        .ok_or_else(|| MarketError::Database(eyre::eyre!("Unknown role stored: {}", db_user.role)))?;

    let token = auth::generate_session_token();
    homeserve_db::repositories::user::create_session(&state.db_pool, &token, db_user.id)
        .await
        .map_err(MarketError::Database)?;

    let response = AuthResponse {
        token,
        user: UserResponse {
            id: db_user.id,
            name: db_user.name,
            email: db_user.email,
            role,
            phone: db_user.phone,
            address: db_user.address,
            avatar_url: db_user.avatar_url,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = auth::bearer_token(&headers) {
        homeserve_db::repositories::user::delete_session(&state.db_pool, token)
            .await
            .map_err(MarketError::Database)?;
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let db_user = homeserve_db::repositories::user::get_user_by_id(&state.db_pool, session.user_id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        id: db_user.id,
        name: db_user.name,
        email: db_user.email,
        role: session.role,
        phone: db_user.phone,
        address: db_user.address,
        avatar_url: db_user.avatar_url,
    }))
}
