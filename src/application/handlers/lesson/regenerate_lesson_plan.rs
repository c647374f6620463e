//! RegenerateLessonPlanHandler - Re-prompts with a saved plan's parameters.

use std::sync::Arc;

use super::load_owned_plan;
use crate::domain::foundation::{PlanId, SessionContext};
use crate::domain::lesson::{prompt, LessonPlan, LessonPlanError};
use crate::ports::{CompletionProvider, CompletionRequest, PlanStore};

pub struct RegenerateLessonPlanHandler {
    plans: Arc<dyn PlanStore>,
    completions: Arc<dyn CompletionProvider>,
}

impl RegenerateLessonPlanHandler {
    pub fn new(plans: Arc<dyn PlanStore>, completions: Arc<dyn CompletionProvider>) -> Self {
        Self { plans, completions }
    }

    /// Replaces the plan's content; parameters and creation time are kept.
    ///
    /// The stored plan is untouched if generation fails.
    pub async fn handle(
        &self,
        session: &SessionContext,
        id: PlanId,
    ) -> Result<LessonPlan, LessonPlanError> {
        let mut plan = load_owned_plan(self.plans.as_ref(), session, &id).await?;

        let completion = self
            .completions
            .complete(CompletionRequest::new(prompt::lesson_plan_prompt(plan.request())))
            .await
            .map_err(|e| {
                tracing::error!(plan_id = %id, error = %e, "Lesson plan regeneration failed");
                LessonPlanError::from(e)
            })?;

        self.plans.update_content(&id, &completion.content).await?;
        plan.replace_content(completion.content);

        tracing::info!(plan_id = %id, user = %session.username, "Lesson plan regenerated");
        Ok(plan)
    }
}
