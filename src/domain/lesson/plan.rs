//! Lesson plan aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::export::ExportRequest;
use crate::domain::foundation::{
    DomainError, ErrorCode, PlanId, Timestamp, Username, ValidationError,
};

/// Parameters a teacher submits to generate a plan.
///
/// # Invariants
///
/// - subject, topic, grade, duration and objectives are non-blank
/// - `customization` is `None` rather than blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRequest {
    subject: String,
    topic: String,
    grade: String,
    duration: String,
    objectives: String,
    customization: Option<String>,
}

impl LessonRequest {
    /// Validates and trims every field.
    ///
    /// # Errors
    ///
    /// - `EmptyField` naming the first blank required field
    pub fn new(
        subject: impl Into<String>,
        topic: impl Into<String>,
        grade: impl Into<String>,
        duration: impl Into<String>,
        objectives: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            subject: required("subject", subject.into())?,
            topic: required("topic", topic.into())?,
            grade: required("grade", grade.into())?,
            duration: required("duration", duration.into())?,
            objectives: required("objectives", objectives.into())?,
            customization: None,
        })
    }

    /// Sets free-text customization; blank text clears it.
    pub fn with_customization(mut self, customization: Option<String>) -> Self {
        self.customization = customization
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn objectives(&self) -> &str {
        &self.objectives
    }

    pub fn customization(&self) -> Option<&str> {
        self.customization.as_deref()
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// A generated lesson plan owned by one user.
///
/// # Invariants
///
/// - parameters never change after generation
/// - only `content` is replaced, by regeneration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlan {
    id: PlanId,
    owner: Username,
    request: LessonRequest,
    content: String,
    created_at: Timestamp,
}

impl LessonPlan {
    /// Creates a freshly generated plan.
    pub fn new(owner: Username, request: LessonRequest, content: impl Into<String>) -> Self {
        Self {
            id: PlanId::new(),
            owner,
            request,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a plan from persistence (no validation).
    pub fn reconstitute(
        id: PlanId,
        owner: Username,
        request: LessonRequest,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            request,
            content,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns the parameters the plan was generated from.
    pub fn request(&self) -> &LessonRequest {
        &self.request
    }

    /// Returns the markdown body.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this plan.
    pub fn is_owner(&self, user: &Username) -> bool {
        &self.owner == user
    }

    /// Validates that the user can act on this plan.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user: &Username) -> Result<(), DomainError> {
        if self.is_owner(user) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to access this lesson plan",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Swaps in regenerated content, returning the previous body.
    pub fn replace_content(&mut self, content: impl Into<String>) -> String {
        std::mem::replace(&mut self.content, content.into())
    }

    /// Converter input for this plan, with the creation time as display text.
    pub fn to_export_request(&self) -> ExportRequest {
        ExportRequest {
            subject: self.request.subject.clone(),
            topic: self.request.topic.clone(),
            grade: self.request.grade.clone(),
            duration: self.request.duration.clone(),
            content: self.content.clone(),
            created_at: Some(self.created_at.display_label()),
        }
    }
}
