//! The converter's input record.

use serde::{Deserialize, Serialize};

/// Value shown for the creation date when the request carries none.
pub const CREATED_PLACEHOLDER: &str = "N/A";

/// Everything needed to render one lesson plan into a document.
///
/// `subject`, `topic`, `grade`, `duration` and `content` are required;
/// `created_at` is free text (already formatted for display) and optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub duration: String,
    pub content: String,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ExportRequest {
    /// Title line shared by every output format: `"{subject} - {topic}"`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.subject, self.topic)
    }

    /// Creation date for the metadata block, or the placeholder.
    pub fn created_label(&self) -> &str {
        self.created_at.as_deref().unwrap_or(CREATED_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(created_at: Option<&str>) -> ExportRequest {
        ExportRequest {
            subject: "Math".to_string(),
            topic: "Algebra".to_string(),
            grade: "Grade 8".to_string(),
            duration: "45 minutes".to_string(),
            content: String::new(),
            created_at: created_at.map(str::to_string),
        }
    }

    #[test]
    fn title_joins_subject_and_topic() {
        assert_eq!(request(None).title(), "Math - Algebra");
    }

    #[test]
    fn created_label_falls_back_to_placeholder() {
        assert_eq!(request(None).created_label(), "N/A");
        assert_eq!(request(Some("2024-01-01")).created_label(), "2024-01-01");
    }

    #[test]
    fn deserializes_camel_case_created_at() {
        let json = r##"{
            "subject": "Math", "topic": "Algebra", "grade": "Grade 8",
            "duration": "45 minutes", "content": "# Intro", "createdAt": "2024-01-01"
        }"##;
        let req: ExportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.created_at.as_deref(), Some("2024-01-01"));
        assert_eq!(req.content, "# Intro");
    }

    #[test]
    fn created_at_is_optional() {
        let json = r#"{
            "subject": "Math", "topic": "Algebra", "grade": "Grade 8",
            "duration": "45 minutes", "content": ""
        }"#;
        let req: ExportRequest = serde_json::from_str(json).unwrap();
        assert!(req.created_at.is_none());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{"subject": "Math", "topic": "Algebra"}"#;
        assert!(serde_json::from_str::<ExportRequest>(json).is_err());
    }
}
