//! HTTP handlers for document downloads.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, handle_lesson_error, ErrorResponse};
use crate::adapters::http::middleware::RequireSession;
use crate::adapters::http::plans::parse_plan_id;
use crate::application::{DocumentConverter, ExportDraftHandler, ExportLessonPlanHandler};
use crate::domain::export::ExportRequest;
use crate::ports::{ExportFormat, ExportedDocument};

#[derive(Clone)]
pub struct ExportHandlers {
    pub converter: Arc<DocumentConverter>,
    pub plan_export: Arc<ExportLessonPlanHandler>,
    pub draft_export: Arc<ExportDraftHandler>,
}

fn parse_format(raw: &str) -> Result<ExportFormat, Response> {
    raw.parse::<ExportFormat>().map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("UNSUPPORTED_FORMAT", e.to_string()),
        )
    })
}

/// Builds an attachment response for an exported document.
pub(crate) fn download_response(document: ExportedDocument) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    let disposition = match HeaderValue::from_bytes(disposition.as_bytes()) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(filename = %document.filename, error = %e, "Unusable download filename");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal("Could not name the exported file"),
            );
        }
    };
    let content_type = HeaderValue::from_str(&document.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response()
}

/// GET /api/export/capabilities - Which formats can be produced right now
pub async fn capabilities(State(handlers): State<ExportHandlers>) -> Response {
    (StatusCode::OK, Json(handlers.converter.capabilities())).into_response()
}

/// POST /api/export/:format - Convert an unsaved draft
pub async fn export_draft(
    State(handlers): State<ExportHandlers>,
    RequireSession(_session): RequireSession,
    Path(format): Path<String>,
    Json(request): Json<ExportRequest>,
) -> Response {
    let format = match parse_format(&format) {
        Ok(format) => format,
        Err(response) => return response,
    };

    match handlers.draft_export.handle(format, &request) {
        Ok(document) => download_response(document),
        Err(e) => handle_lesson_error(e),
    }
}

/// GET /api/plans/:id/export/:format - Download a saved plan
pub async fn export_plan(
    State(handlers): State<ExportHandlers>,
    RequireSession(session): RequireSession,
    Path((plan_id, format)): Path<(String, String)>,
) -> Response {
    let plan_id = match parse_plan_id(&plan_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let format = match parse_format(&format) {
        Ok(format) => format,
        Err(response) => return response,
    };

    match handlers.plan_export.handle(&session, plan_id, format).await {
        Ok(document) => download_response(document),
        Err(e) => handle_lesson_error(e),
    }
}
