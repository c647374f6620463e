//! DeleteLessonPlanHandler - Command handler for removing a saved plan.

use std::sync::Arc;

use super::load_owned_plan;
use crate::domain::foundation::{PlanId, SessionContext};
use crate::domain::lesson::LessonPlanError;
use crate::ports::PlanStore;

pub struct DeleteLessonPlanHandler {
    plans: Arc<dyn PlanStore>,
}

impl DeleteLessonPlanHandler {
    pub fn new(plans: Arc<dyn PlanStore>) -> Self {
        Self { plans }
    }

    /// # Errors
    ///
    /// - `NotFound` if the plan does not exist
    /// - `Forbidden` if it is owned by another user
    pub async fn handle(&self, session: &SessionContext, id: PlanId) -> Result<(), LessonPlanError> {
        load_owned_plan(self.plans.as_ref(), session, &id).await?;
        self.plans.delete(&id).await?;

        tracing::info!(plan_id = %id, user = %session.username, "Lesson plan deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPlanStore;
    use crate::application::handlers::lesson::test_support::{plan_for, session};

    #[tokio::test]
    async fn owner_can_delete() {
        let store = InMemoryPlanStore::new();
        let plan = plan_for("alice");
        store.insert(&plan).await.unwrap();

        let handler = DeleteLessonPlanHandler::new(Arc::new(store.clone()));
        handler.handle(&session("alice"), *plan.id()).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn missing_plan_is_not_found() {
        let handler = DeleteLessonPlanHandler::new(Arc::new(InMemoryPlanStore::new()));
        let id = PlanId::new();

        let err = handler.handle(&session("alice"), id).await.unwrap_err();

        assert_eq!(err, LessonPlanError::NotFound(id));
    }

    #[tokio::test]
    async fn other_users_plan_is_forbidden_and_kept() {
        let store = InMemoryPlanStore::new();
        let plan = plan_for("bob");
        store.insert(&plan).await.unwrap();

        let handler = DeleteLessonPlanHandler::new(Arc::new(store.clone()));
        let err = handler.handle(&session("alice"), *plan.id()).await.unwrap_err();

        assert_eq!(err, LessonPlanError::Forbidden);
        assert_eq!(store.len().await, 1);
    }
}
