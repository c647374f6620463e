//! GenerateLessonPlanHandler - Asks the completion provider for a new plan.

use std::sync::Arc;

use crate::domain::foundation::SessionContext;
use crate::domain::lesson::{prompt, LessonPlan, LessonPlanError, LessonRequest};
use crate::ports::{CompletionProvider, CompletionRequest};

/// Lesson parameters as submitted by the user.
#[derive(Debug, Clone)]
pub struct GenerateLessonPlanCommand {
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub duration: String,
    pub objectives: String,
    pub customization: Option<String>,
}

/// Handler for generating (unsaved) lesson plans.
pub struct GenerateLessonPlanHandler {
    completions: Arc<dyn CompletionProvider>,
}

impl GenerateLessonPlanHandler {
    pub fn new(completions: Arc<dyn CompletionProvider>) -> Self {
        Self { completions }
    }

    /// Returns a plan owned by the session user. Nothing is persisted.
    pub async fn handle(
        &self,
        session: &SessionContext,
        cmd: GenerateLessonPlanCommand,
    ) -> Result<LessonPlan, LessonPlanError> {
        let request = LessonRequest::new(
            cmd.subject,
            cmd.topic,
            cmd.grade,
            cmd.duration,
            cmd.objectives,
        )?
        .with_customization(cmd.customization);

        let completion = self
            .completions
            .complete(CompletionRequest::new(prompt::lesson_plan_prompt(&request)))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Lesson plan generation failed");
                LessonPlanError::from(e)
            })?;

        tracing::info!(
            user = %session.username,
            subject = request.subject(),
            topic = request.topic(),
            "Lesson plan generated"
        );

        Ok(LessonPlan::new(
            session.username.clone(),
            request,
            completion.content,
        ))
    }
}
