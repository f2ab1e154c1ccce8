use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/providers/me/availability",
            get(handlers::availability::get_my_availability),
        )
        .route(
            "/api/providers/me/availability",
            put(handlers::availability::upsert_my_availability),
        )
        .route(
            "/api/providers/me/availability/:day",
            delete(handlers::availability::delete_my_availability_day),
        )
}
