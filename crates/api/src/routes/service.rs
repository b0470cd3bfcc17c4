use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/v1/services", post(handlers::service::create_service))
        .route("/api/v1/services", get(handlers::service::get_services))
        .route("/api/v1/services/:id", get(handlers::service::get_service))
        .route(
            "/api/v1/services/:id/appt-types",
            post(handlers::service::create_appt_type),
        )
}
