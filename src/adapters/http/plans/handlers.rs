//! HTTP handlers for lesson plan endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, handle_lesson_error, ErrorResponse};
use crate::adapters::http::middleware::RequireSession;
use crate::application::{
    DeleteLessonPlanHandler, GenerateLessonPlanHandler, GenerateStudyMaterialsHandler,
    ListLessonPlansHandler, RegenerateLessonPlanHandler, SaveLessonPlanHandler,
};
use crate::domain::foundation::PlanId;

use super::dto::{
    GeneratePlanRequest, PlanListResponse, PlanResponse, SavePlanRequest, StudyMaterialsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlanHandlers {
    pub generate: Arc<GenerateLessonPlanHandler>,
    pub save: Arc<SaveLessonPlanHandler>,
    pub list: Arc<ListLessonPlansHandler>,
    pub delete: Arc<DeleteLessonPlanHandler>,
    pub regenerate: Arc<RegenerateLessonPlanHandler>,
    pub study_materials: Arc<GenerateStudyMaterialsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn parse_plan_id(raw: &str) -> Result<PlanId, Response> {
    raw.parse::<PlanId>().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request("Invalid plan ID"),
        )
    })
}

/// POST /api/plans/generate - Generate an unsaved plan
pub async fn generate_plan(
    State(handlers): State<PlanHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<GeneratePlanRequest>,
) -> Response {
    match handlers.generate.handle(&session, req.into()).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_lesson_error(e),
    }
}

/// POST /api/plans - Save a plan
pub async fn save_plan(
    State(handlers): State<PlanHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<SavePlanRequest>,
) -> Response {
    match handlers.save.handle(&session, req.into()).await {
        Ok(plan) => (StatusCode::CREATED, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_lesson_error(e),
    }
}

/// GET /api/plans - List the user's plans, newest first
pub async fn list_plans(
    State(handlers): State<PlanHandlers>,
    RequireSession(session): RequireSession,
) -> Response {
    match handlers.list.handle(&session).await {
        Ok(plans) => (StatusCode::OK, Json(PlanListResponse::from(plans))).into_response(),
        Err(e) => handle_lesson_error(e),
    }
}

/// DELETE /api/plans/:id - Delete a plan
pub async fn delete_plan(
    State(handlers): State<PlanHandlers>,
    RequireSession(session): RequireSession,
    Path(plan_id): Path<String>,
) -> Response {
    let plan_id = match parse_plan_id(&plan_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(&session, plan_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_lesson_error(e),
    }
}

/// POST /api/plans/:id/regenerate - Replace a plan's content
pub async fn regenerate_plan(
    State(handlers): State<PlanHandlers>,
    RequireSession(session): RequireSession,
    Path(plan_id): Path<String>,
) -> Response {
    let plan_id = match parse_plan_id(&plan_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.regenerate.handle(&session, plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_lesson_error(e),
    }
}

/// POST /api/plans/:id/study-materials - Notes and quiz for a plan
pub async fn study_materials(
    State(handlers): State<PlanHandlers>,
    RequireSession(session): RequireSession,
    Path(plan_id): Path<String>,
) -> Response {
    let plan_id = match parse_plan_id(&plan_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.study_materials.handle(&session, plan_id).await {
        Ok(materials) => {
            (StatusCode::OK, Json(StudyMaterialsResponse::from(materials))).into_response()
        }
        Err(e) => handle_lesson_error(e),
    }
}
