//! Export handlers - Download a plan as PDF, DOCX or Markdown.

mod export_draft;
mod export_lesson_plan;

pub use export_draft::ExportDraftHandler;
pub use export_lesson_plan::ExportLessonPlanHandler;

use crate::application::DocumentConverter;
use crate::domain::export::ExportRequest;
use crate::domain::lesson::LessonPlanError;
use crate::ports::{ExportFormat, ExportedDocument};

/// Runs the converter, turning an absent backend into `ExportUnavailable`.
pub(crate) fn convert(
    converter: &DocumentConverter,
    format: ExportFormat,
    request: &ExportRequest,
) -> Result<ExportedDocument, LessonPlanError> {
    match converter.export(format, request) {
        Ok(Some(document)) => Ok(document),
        Ok(None) => {
            tracing::warn!(format = %format, "Export requested for unavailable format");
            Err(LessonPlanError::ExportUnavailable(format))
        }
        Err(e) => {
            tracing::error!(format = %format, error = %e, "Export failed");
            Err(e.into())
        }
    }
}
