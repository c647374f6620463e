//! Lesson plan command and query handlers.

mod delete_lesson_plan;
mod generate_lesson_plan;
mod generate_study_materials;
mod list_lesson_plans;
mod regenerate_lesson_plan;
mod save_lesson_plan;

pub use delete_lesson_plan::DeleteLessonPlanHandler;
pub use generate_lesson_plan::{GenerateLessonPlanCommand, GenerateLessonPlanHandler};
pub use generate_study_materials::{GenerateStudyMaterialsHandler, StudyMaterials};
pub use list_lesson_plans::ListLessonPlansHandler;
pub use regenerate_lesson_plan::RegenerateLessonPlanHandler;
pub use save_lesson_plan::{SaveLessonPlanCommand, SaveLessonPlanHandler};

use crate::domain::foundation::{PlanId, SessionContext};
use crate::domain::lesson::{LessonPlan, LessonPlanError};
use crate::ports::PlanStore;

/// Loads a plan the session user owns.
///
/// # Errors
///
/// - `NotFound` if no plan has this id
/// - `Forbidden` if it belongs to someone else
pub(crate) async fn load_owned_plan(
    plans: &dyn PlanStore,
    session: &SessionContext,
    id: &PlanId,
) -> Result<LessonPlan, LessonPlanError> {
    let plan = plans
        .find(id)
        .await?
        .ok_or_else(|| LessonPlanError::not_found(*id))?;

    if let Err(e) = plan.authorize(&session.username) {
        tracing::warn!(plan_id = %id, user = %session.username, "Access to another user's plan denied");
        return Err(e.into());
    }
    Ok(plan)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::foundation::{SessionContext, Username};
    use crate::domain::lesson::{LessonPlan, LessonRequest};

    pub fn session(name: &str) -> SessionContext {
        SessionContext::new(Username::new(name).unwrap())
    }

    pub fn lesson_request() -> LessonRequest {
        LessonRequest::new("Math", "Algebra", "Grade 8", "45 minutes", "Solve linear equations")
            .unwrap()
    }

    pub fn plan_for(owner: &str) -> LessonPlan {
        LessonPlan::new(Username::new(owner).unwrap(), lesson_request(), "# Intro\n- Variables")
    }
}
