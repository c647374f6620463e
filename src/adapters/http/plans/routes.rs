//! HTTP routes for lesson plan endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_plan, generate_plan, list_plans, regenerate_plan, save_plan, study_materials,
    PlanHandlers,
};

/// Creates the plan router, mounted at `/api/plans`.
pub fn plan_routes(handlers: PlanHandlers) -> Router {
    Router::new()
        .route("/", get(list_plans).post(save_plan))
        .route("/generate", post(generate_plan))
        .route("/:id", delete(delete_plan))
        .route("/:id/regenerate", post(regenerate_plan))
        .route("/:id/study-materials", post(study_materials))
        .with_state(handlers)
}
