//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Roster
        .route("/teachers", get(handlers::list_teachers))
        .route("/teachers", post(handlers::register_teacher))
        .route("/students", get(handlers::list_students))
        .route("/students", post(handlers::register_student))
        // Monthly availability
        .route("/teacher_schedules", get(handlers::get_teacher_schedule))
        .route("/teacher_schedules", post(handlers::save_teacher_schedule))
        .route("/student_schedules", get(handlers::get_student_schedule))
        .route("/student_schedules", post(handlers::save_student_schedule))
        // Matching
        .route("/generate_schedule", post(handlers::generate_schedule))
        .route("/matched_schedules", get(handlers::get_matched_schedules))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
