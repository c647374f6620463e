//! SaveLessonPlanHandler - Persists a generated plan for the session user.

use std::sync::Arc;

use crate::domain::foundation::SessionContext;
use crate::domain::lesson::{LessonPlan, LessonPlanError, LessonRequest};
use crate::ports::PlanStore;

/// A plan as shown to the user, ready to be saved.
#[derive(Debug, Clone)]
pub struct SaveLessonPlanCommand {
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub duration: String,
    pub objectives: String,
    pub customization: Option<String>,
    pub content: String,
}

pub struct SaveLessonPlanHandler {
    plans: Arc<dyn PlanStore>,
}

impl SaveLessonPlanHandler {
    pub fn new(plans: Arc<dyn PlanStore>) -> Self {
        Self { plans }
    }

    /// Inserts one new record owned by the session user.
    pub async fn handle(
        &self,
        session: &SessionContext,
        cmd: SaveLessonPlanCommand,
    ) -> Result<LessonPlan, LessonPlanError> {
        let request = LessonRequest::new(
            cmd.subject,
            cmd.topic,
            cmd.grade,
            cmd.duration,
            cmd.objectives,
        )?
        .with_customization(cmd.customization);

        let plan = LessonPlan::new(session.username.clone(), request, cmd.content);

        self.plans.insert(&plan).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save lesson plan");
            LessonPlanError::from(e)
        })?;

        tracing::info!(plan_id = %plan.id(), user = %session.username, "Lesson plan saved");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPlanStore;
    use crate::application::handlers::lesson::test_support::session;
    use crate::domain::foundation::{DomainError, PlanId, Username};
    use async_trait::async_trait;

    struct FailingPlanStore;

    #[async_trait]
    impl PlanStore for FailingPlanStore {
        async fn insert(&self, _plan: &LessonPlan) -> Result<(), DomainError> {
            Err(DomainError::database("Simulated insert failure"))
        }

        async fn find(&self, _id: &PlanId) -> Result<Option<LessonPlan>, DomainError> {
            Ok(None)
        }

        async fn list_by_owner(&self, _owner: &Username) -> Result<Vec<LessonPlan>, DomainError> {
            Ok(vec![])
        }

        async fn update_content(&self, _id: &PlanId, _content: &str) -> Result<(), DomainError> {
            Ok(())
        }

        async fn delete(&self, _id: &PlanId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn command() -> SaveLessonPlanCommand {
        SaveLessonPlanCommand {
            subject: "Math".to_string(),
            topic: "Algebra".to_string(),
            grade: "Grade 8".to_string(),
            duration: "45 minutes".to_string(),
            objectives: "Solve linear equations".to_string(),
            customization: Some("   ".to_string()),
            content: "# Intro".to_string(),
        }
    }

    #[tokio::test]
    async fn saves_plan_owned_by_session_user() {
        let store = InMemoryPlanStore::new();
        let handler = SaveLessonPlanHandler::new(Arc::new(store.clone()));

        let plan = handler.handle(&session("alice"), command()).await.unwrap();

        let stored = store.find(plan.id()).await.unwrap().unwrap();
        assert_eq!(stored.owner().as_str(), "alice");
        assert_eq!(stored.content(), "# Intro");
        assert_eq!(stored.request().customization(), None);
    }

    #[tokio::test]
    async fn each_save_inserts_a_new_record() {
        let store = InMemoryPlanStore::new();
        let handler = SaveLessonPlanHandler::new(Arc::new(store.clone()));

        handler.handle(&session("alice"), command()).await.unwrap();
        handler.handle(&session("alice"), command()).await.unwrap();

        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let handler = SaveLessonPlanHandler::new(Arc::new(FailingPlanStore));

        let err = handler.handle(&session("alice"), command()).await.unwrap_err();

        assert!(matches!(err, LessonPlanError::Infrastructure(_)));
    }
}
