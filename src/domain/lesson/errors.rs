//! Lesson workflow error types.

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, ValidationError};
use crate::ports::{AIError, ExportError, ExportFormat};

/// Errors raised by the lesson plan handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonPlanError {
    /// Plan was not found.
    NotFound(PlanId),
    /// Plan belongs to another user.
    Forbidden,
    /// A required parameter was blank or malformed.
    ValidationFailed { field: String, message: String },
    /// The completion provider failed; nothing was saved.
    Generation(String),
    /// The backend for this format is not available.
    ExportUnavailable(ExportFormat),
    /// Rendering failed inside an available backend.
    Export(String),
    /// Store failure.
    Infrastructure(String),
}

impl LessonPlanError {
    pub fn not_found(id: PlanId) -> Self {
        LessonPlanError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LessonPlanError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        LessonPlanError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            LessonPlanError::NotFound(_) => ErrorCode::PlanNotFound,
            LessonPlanError::Forbidden => ErrorCode::Forbidden,
            LessonPlanError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LessonPlanError::Generation(_) => ErrorCode::AIProviderError,
            LessonPlanError::ExportUnavailable(_) => ErrorCode::ExportUnavailable,
            LessonPlanError::Export(_) => ErrorCode::InternalError,
            LessonPlanError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            LessonPlanError::NotFound(id) => format!("Lesson plan not found: {}", id),
            LessonPlanError::Forbidden => "Permission denied".to_string(),
            LessonPlanError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            LessonPlanError::Generation(msg) => format!("Lesson generation failed: {}", msg),
            LessonPlanError::ExportUnavailable(format) => {
                format!("{} export is not available", format.display_name())
            }
            LessonPlanError::Export(msg) => format!("Export failed: {}", msg),
            LessonPlanError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LessonPlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LessonPlanError {}

impl From<DomainError> for LessonPlanError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => LessonPlanError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                LessonPlanError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => LessonPlanError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for LessonPlanError {
    fn from(err: ValidationError) -> Self {
        LessonPlanError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AIError> for LessonPlanError {
    fn from(err: AIError) -> Self {
        LessonPlanError::Generation(err.to_string())
    }
}

impl From<ExportError> for LessonPlanError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Unavailable(format) => LessonPlanError::ExportUnavailable(format),
            other => LessonPlanError::Export(other.to_string()),
        }
    }
}
