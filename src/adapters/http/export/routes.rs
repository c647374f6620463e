//! HTTP routes for document downloads.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{capabilities, export_draft, export_plan, ExportHandlers};

/// Creates the draft export router, mounted at `/api/export`.
pub fn export_routes(handlers: ExportHandlers) -> Router {
    Router::new()
        .route("/capabilities", get(capabilities))
        .route("/:format", post(export_draft))
        .with_state(handlers)
}

/// Saved-plan downloads, merged into the `/api/plans` router.
pub fn plan_export_routes(handlers: ExportHandlers) -> Router {
    Router::new()
        .route("/:id/export/:format", get(export_plan))
        .with_state(handlers)
}
