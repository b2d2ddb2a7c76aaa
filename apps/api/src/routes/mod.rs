pub mod health;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::cv::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/cvs",
            get(handlers::list_cvs).post(handlers::create_cv),
        )
        .route(
            "/api/v1/cvs/:id",
            patch(handlers::update_cv).delete(handlers::delete_cv),
        )
        .route("/api/v1/cvs/main/download", get(handlers::download_main_cv))
        .route("/api/v1/cvs/:id/download", get(handlers::download_cv_by_id))
        .with_state(state)
}
