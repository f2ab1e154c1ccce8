use axum::http::{header, HeaderMap, HeaderValue};
use homeserve_api::middleware::auth;
use homeserve_core::errors::MarketError;
use homeserve_core::models::user::{Session, UserRole};
use uuid::Uuid;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = MarketError::NotFound("Resource not found".to_string());

    let response = homeserve_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = MarketError::Validation("Invalid input".to_string());

    let response = homeserve_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = MarketError::Authentication("Invalid password".to_string());

    let response = homeserve_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = MarketError::Authorization("Not authorized".to_string());

    let response = homeserve_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = MarketError::Database(eyre::eyre!("Database error"));

    let response = homeserve_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // The PHC string is not the raw password
    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_verify_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert!(auth::verify_password(password, &hashed).unwrap());
    assert!(!auth::verify_password("wrong_password", &hashed).unwrap());
}

#[tokio::test]
async fn test_session_tokens_are_unique() {
    let first = auth::generate_session_token();
    let second = auth::generate_session_token();

    assert_eq!(first.len(), 48);
    assert_ne!(first, second);
}

#[test]
fn test_bearer_token_extraction() {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer abc123"),
    );
    assert_eq!(auth::bearer_token(&headers), Some("abc123"));

    let empty = HeaderMap::new();
    assert_eq!(auth::bearer_token(&empty), None);

    let mut basic = HeaderMap::new();
    basic.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Basic abc123"),
    );
    assert_eq!(auth::bearer_token(&basic), None);
}

#[test]
fn test_require_role() {
    let session = Session {
        user_id: Uuid::new_v4(),
        role: UserRole::Provider,
    };

    assert!(auth::require_role(&session, UserRole::Provider).is_ok());

    let denied = auth::require_role(&session, UserRole::Admin).unwrap_err();
    assert!(matches!(denied, MarketError::Authorization(_)));
}
