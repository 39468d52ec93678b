pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::questions::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(handlers::handle_form_options))
        // Credential API
        .route(
            "/api/v1/credential",
            get(handlers::handle_credential_status)
                .put(handlers::handle_save_credential)
                .delete(handlers::handle_clear_credential),
        )
        // Questions API
        .route("/api/v1/questions", post(handlers::handle_generate))
        .route(
            "/api/v1/questions/:session_id/regenerate",
            post(handlers::handle_regenerate),
        )
        .with_state(state)
}
