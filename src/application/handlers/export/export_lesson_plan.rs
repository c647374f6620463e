//! ExportLessonPlanHandler - Renders a saved plan for download.

use std::sync::Arc;

use super::convert;
use crate::application::handlers::lesson::load_owned_plan;
use crate::application::DocumentConverter;
use crate::domain::foundation::{PlanId, SessionContext};
use crate::domain::lesson::LessonPlanError;
use crate::ports::{ExportFormat, ExportedDocument, PlanStore};

pub struct ExportLessonPlanHandler {
    plans: Arc<dyn PlanStore>,
    converter: Arc<DocumentConverter>,
}

impl ExportLessonPlanHandler {
    pub fn new(plans: Arc<dyn PlanStore>, converter: Arc<DocumentConverter>) -> Self {
        Self { plans, converter }
    }

    pub async fn handle(
        &self,
        session: &SessionContext,
        id: PlanId,
        format: ExportFormat,
    ) -> Result<ExportedDocument, LessonPlanError> {
        let plan = load_owned_plan(self.plans.as_ref(), session, &id).await?;
        convert(&self.converter, format, &plan.to_export_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::{DocxBackend, UnavailableBackend};
    use crate::adapters::memory::InMemoryPlanStore;
    use crate::application::handlers::lesson::test_support::{plan_for, session};

    fn converter() -> Arc<DocumentConverter> {
        Arc::new(DocumentConverter::new(
            Arc::new(DocxBackend::new()),
            Arc::new(UnavailableBackend::new(ExportFormat::Pdf)),
        ))
    }

    async fn handler_with(owner: &str) -> (ExportLessonPlanHandler, PlanId) {
        let store = InMemoryPlanStore::new();
        let plan = plan_for(owner);
        store.insert(&plan).await.unwrap();
        (ExportLessonPlanHandler::new(Arc::new(store), converter()), *plan.id())
    }

    #[tokio::test]
    async fn exports_markdown_with_plan_header() {
        let (handler, id) = handler_with("alice").await;

        let doc = handler.handle(&session("alice"), id, ExportFormat::Markdown).await.unwrap();

        let text = String::from_utf8(doc.content).unwrap();
        assert!(text.starts_with("# Math - Algebra\n\n**Grade/Level:** Grade 8"));
        assert!(text.ends_with("---\n\n# Intro\n- Variables"));
        assert_eq!(doc.filename, "lesson_plan_Math_Algebra.md");
    }

    #[tokio::test]
    async fn exports_docx_package() {
        let (handler, id) = handler_with("alice").await;

        let doc = handler.handle(&session("alice"), id, ExportFormat::Docx).await.unwrap();

        assert_eq!(&doc.content[..2], b"PK");
        assert_eq!(doc.filename, "lesson_plan_Math_Algebra.docx");
    }

    #[tokio::test]
    async fn unavailable_format_is_reported() {
        let (handler, id) = handler_with("alice").await;

        let err = handler.handle(&session("alice"), id, ExportFormat::Pdf).await.unwrap_err();

        assert_eq!(err, LessonPlanError::ExportUnavailable(ExportFormat::Pdf));
    }

    #[tokio::test]
    async fn other_users_plan_is_forbidden() {
        let (handler, id) = handler_with("bob").await;

        let err = handler.handle(&session("alice"), id, ExportFormat::Markdown).await.unwrap_err();

        assert_eq!(err, LessonPlanError::Forbidden);
    }
}
