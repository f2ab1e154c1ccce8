//! # Authentication Module
//!
//! This module provides authentication-related utilities for the HomeServe API:
//! password hashing and verification for user accounts, bearer-token session
//! resolution, and role checks for the role-scoped management endpoints.
//!
//! Password hashing uses Argon2, protecting stored credentials from common
//! attacks like rainbow tables and brute force attempts. Sessions are opaque
//! random tokens stored server-side; resolving one yields an explicit
//! [`Session`] object that handlers treat as read-only.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::http::{header, HeaderMap};
use eyre::Result;
use rand::{distributions::Alphanumeric, Rng};

use homeserve_core::errors::{MarketError, MarketResult};
use homeserve_core::models::user::{Session, UserRole};

use crate::ApiState;

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using industry-standard
/// parameters for Argon2.
///
/// # Security Notes
///
/// - Uses a random salt for each password
/// - Uses default Argon2 parameters (memory: 19MiB, iterations: 3, parallelism: 4)
/// - Returns password in PHC string format (includes algorithm, version, parameters, salt, and hash)
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a plain text password against a stored PHC hash string.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;

    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

/// Generates an opaque session token for a freshly logged-in user.
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Extracts the bearer token from the Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the request's bearer token into a [`Session`].
///
/// The session object carries only the authenticated user's id and role and
/// is the single source of identity for every handler that needs one.
pub async fn authenticate(state: &ApiState, headers: &HeaderMap) -> MarketResult<Session> {
    let token = bearer_token(headers)
        .ok_or_else(|| MarketError::Authentication("Missing bearer token".to_string()))?;

    let user = homeserve_db::repositories::user::get_session_user(&state.db_pool, token)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::Authentication("Invalid or expired session".to_string()))?;

    let role = UserRole::parse(&user.role)
        .ok_or_else(|| MarketError::Database(eyre::eyre!("Unknown role stored: {}", user.role)))?;

    Ok(Session {
        user_id: user.id,
        role,
    })
}

/// Requires the session to carry the given role. A mismatch is an
/// authorization error, which the error middleware turns into a 403.
pub fn require_role(session: &Session, role: UserRole) -> MarketResult<()> {
    if session.role != role {
        return Err(MarketError::Authorization(format!(
            "This action requires the {} role",
            role.as_str()
        )));
    }

    Ok(())
}
