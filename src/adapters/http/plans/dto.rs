//! Request/response bodies for lesson plan endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{GenerateLessonPlanCommand, SaveLessonPlanCommand, StudyMaterials};
use crate::domain::lesson::LessonPlan;

/// Body of `POST /api/plans/generate`.
///
/// Missing fields arrive blank and are rejected by validation with a 400.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratePlanRequest {
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub duration: String,
    pub objectives: String,
    pub customization: Option<String>,
}

impl From<GeneratePlanRequest> for GenerateLessonPlanCommand {
    fn from(req: GeneratePlanRequest) -> Self {
        Self {
            subject: req.subject,
            topic: req.topic,
            grade: req.grade,
            duration: req.duration,
            objectives: req.objectives,
            customization: req.customization,
        }
    }
}

/// Body of `POST /api/plans`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavePlanRequest {
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub duration: String,
    pub objectives: String,
    pub customization: Option<String>,
    pub content: String,
}

impl From<SavePlanRequest> for SaveLessonPlanCommand {
    fn from(req: SavePlanRequest) -> Self {
        Self {
            subject: req.subject,
            topic: req.topic,
            grade: req.grade,
            duration: req.duration,
            objectives: req.objectives,
            customization: req.customization,
            content: req.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: String,
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub duration: String,
    pub objectives: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&LessonPlan> for PlanResponse {
    fn from(plan: &LessonPlan) -> Self {
        let request = plan.request();
        Self {
            id: plan.id().to_string(),
            subject: request.subject().to_string(),
            topic: request.topic().to_string(),
            grade: request.grade().to_string(),
            duration: request.duration().to_string(),
            objectives: request.objectives().to_string(),
            customization: request.customization().map(str::to_string),
            content: plan.content().to_string(),
            created_at: *plan.created_at().as_datetime(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanListResponse {
    pub plans: Vec<PlanResponse>,
    pub total: usize,
}

impl From<Vec<LessonPlan>> for PlanListResponse {
    fn from(plans: Vec<LessonPlan>) -> Self {
        let plans: Vec<PlanResponse> = plans.iter().map(PlanResponse::from).collect();
        Self {
            total: plans.len(),
            plans,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMaterialsResponse {
    pub plan_id: String,
    pub content: String,
}

impl From<StudyMaterials> for StudyMaterialsResponse {
    fn from(materials: StudyMaterials) -> Self {
        Self {
            plan_id: materials.plan_id.to_string(),
            content: materials.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Username;
    use crate::domain::lesson::LessonRequest;

    #[test]
    fn generate_request_tolerates_missing_fields() {
        let req: GeneratePlanRequest = serde_json::from_str(r#"{"subject": "Math"}"#).unwrap();
        assert_eq!(req.subject, "Math");
        assert!(req.topic.is_empty());
        assert!(req.customization.is_none());
    }

    #[test]
    fn plan_response_carries_all_fields() {
        let request = LessonRequest::new("Math", "Algebra", "Grade 8", "45 minutes", "Solve")
            .unwrap()
            .with_customization(Some("Visual".to_string()));
        let plan = LessonPlan::new(Username::new("alice").unwrap(), request, "# Intro");

        let response = PlanResponse::from(&plan);

        assert_eq!(response.id, plan.id().to_string());
        assert_eq!(response.customization.as_deref(), Some("Visual"));
        assert_eq!(response.content, "# Intro");
    }
}
