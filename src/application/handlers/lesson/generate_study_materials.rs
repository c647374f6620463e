//! GenerateStudyMaterialsHandler - Study notes and a quiz for a saved plan.

use serde::Serialize;
use std::sync::Arc;

use super::load_owned_plan;
use crate::domain::foundation::{PlanId, SessionContext};
use crate::domain::lesson::{prompt, LessonPlanError};
use crate::ports::{CompletionProvider, CompletionRequest, PlanStore};

/// Markdown with notes, quiz questions and an answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyMaterials {
    pub plan_id: PlanId,
    pub content: String,
}

pub struct GenerateStudyMaterialsHandler {
    plans: Arc<dyn PlanStore>,
    completions: Arc<dyn CompletionProvider>,
}

impl GenerateStudyMaterialsHandler {
    pub fn new(plans: Arc<dyn PlanStore>, completions: Arc<dyn CompletionProvider>) -> Self {
        Self { plans, completions }
    }

    pub async fn handle(
        &self,
        session: &SessionContext,
        id: PlanId,
    ) -> Result<StudyMaterials, LessonPlanError> {
        let plan = load_owned_plan(self.plans.as_ref(), session, &id).await?;

        let completion = self
            .completions
            .complete(CompletionRequest::new(prompt::study_materials_prompt(&plan)))
            .await
            .map_err(|e| {
                tracing::error!(plan_id = %id, error = %e, "Study material generation failed");
                LessonPlanError::from(e)
            })?;

        tracing::info!(plan_id = %id, user = %session.username, "Study materials generated");
        Ok(StudyMaterials {
            plan_id: id,
            content: completion.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionProvider;
    use crate::adapters::memory::InMemoryPlanStore;
    use crate::application::handlers::lesson::test_support::{plan_for, session};

    #[tokio::test]
    async fn returns_generated_materials_without_touching_plan() {
        let store = InMemoryPlanStore::new();
        let plan = plan_for("alice");
        store.insert(&plan).await.unwrap();
        let provider = MockCompletionProvider::new().with_response("# Study Notes\n- x");

        let handler =
            GenerateStudyMaterialsHandler::new(Arc::new(store.clone()), Arc::new(provider.clone()));
        let materials = handler.handle(&session("alice"), *plan.id()).await.unwrap();

        assert_eq!(materials.content, "# Study Notes\n- x");
        assert_eq!(materials.plan_id, *plan.id());
        assert_eq!(store.find(plan.id()).await.unwrap().unwrap().content(), plan.content());

        let prompt = &provider.get_calls()[0].prompt;
        assert!(prompt.contains("# Quiz Questions"));
        assert!(prompt.ends_with(plan.content()));
    }

    #[tokio::test]
    async fn missing_plan_is_not_found() {
        let handler = GenerateStudyMaterialsHandler::new(
            Arc::new(InMemoryPlanStore::new()),
            Arc::new(MockCompletionProvider::new()),
        );
        let id = PlanId::new();

        let err = handler.handle(&session("alice"), id).await.unwrap_err();
        assert_eq!(err, LessonPlanError::NotFound(id));
    }
}
