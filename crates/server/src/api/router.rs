use axum::{middleware, routing::post, Router};

use crate::middleware::require_auth;
use crate::state::AppState;

use super::handlers;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/media-check", post(handlers::media_check))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .with_state(state)
}
