use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/providers", get(handlers::provider::list_providers))
        .route("/api/providers/me", put(handlers::provider::update_my_profile))
        .route("/api/providers/:id", get(handlers::provider::get_provider))
}
