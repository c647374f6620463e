//! ExportDraftHandler - Renders content that has not been saved yet.

use std::sync::Arc;

use super::convert;
use crate::application::DocumentConverter;
use crate::domain::export::ExportRequest;
use crate::domain::lesson::LessonPlanError;
use crate::ports::{ExportFormat, ExportedDocument};

pub struct ExportDraftHandler {
    converter: Arc<DocumentConverter>,
}

impl ExportDraftHandler {
    pub fn new(converter: Arc<DocumentConverter>) -> Self {
        Self { converter }
    }

    pub fn handle(
        &self,
        format: ExportFormat,
        request: &ExportRequest,
    ) -> Result<ExportedDocument, LessonPlanError> {
        convert(&self.converter, format, request)
    }
}
