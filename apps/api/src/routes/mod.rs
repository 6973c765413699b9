pub mod health;
pub mod resumes;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::ingest::handlers as ingest_handlers;
use crate::state::AppState;
use crate::wizard::handlers as wizard_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard sessions
        .route(
            "/api/v1/sessions",
            post(wizard_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(wizard_handlers::handle_get_session),
        )
        .route(
            "/api/v1/sessions/:id/advance",
            post(wizard_handlers::handle_advance),
        )
        .route(
            "/api/v1/sessions/:id/retreat",
            post(wizard_handlers::handle_retreat),
        )
        .route(
            "/api/v1/sessions/:id/strategy",
            put(wizard_handlers::handle_set_strategy),
        )
        .route(
            "/api/v1/sessions/:id/document",
            patch(wizard_handlers::handle_patch_document),
        )
        .route(
            "/api/v1/sessions/:id/prefill",
            post(wizard_handlers::handle_prefill),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(wizard_handlers::handle_preview),
        )
        .route(
            "/api/v1/sessions/:id/save",
            post(wizard_handlers::handle_save),
        )
        // Ingestion pipeline
        .route("/api/v1/analyze", post(ingest_handlers::handle_analyze))
        // Saved resumes
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/export",
            get(resumes::handle_export),
        )
        .with_state(state)
}
