//! ListLessonPlansHandler - Query handler for the session user's saved plans.

use std::sync::Arc;

use crate::domain::foundation::SessionContext;
use crate::domain::lesson::{LessonPlan, LessonPlanError};
use crate::ports::PlanStore;

pub struct ListLessonPlansHandler {
    plans: Arc<dyn PlanStore>,
}

impl ListLessonPlansHandler {
    pub fn new(plans: Arc<dyn PlanStore>) -> Self {
        Self { plans }
    }

    /// Returns the user's plans, newest first.
    pub async fn handle(&self, session: &SessionContext) -> Result<Vec<LessonPlan>, LessonPlanError> {
        Ok(self.plans.list_by_owner(&session.username).await?)
    }
}
