use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/v1/users", post(handlers::user::create_user))
        .route("/api/v1/users", get(handlers::user::get_current_user))
}
