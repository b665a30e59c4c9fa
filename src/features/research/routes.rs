use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::research::handlers;
use crate::features::research::services::ReportIntakeService;

/// Create routes for the research intake feature
pub fn routes(service: Arc<ReportIntakeService>) -> Router {
    Router::new()
        .route("/api/research/upload", post(handlers::upload_report))
        .with_state(service)
}
