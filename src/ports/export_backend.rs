//! Export Backend Ports - rendering document models into file bytes.
//!
//! The domain builds a [`FlowDocument`] or a [`PageLayout`]; a backend turns
//! that model into the bytes of a concrete container (DOCX, PDF). Each backend
//! also answers whether it can run at all, so the converter can degrade one
//! format without affecting the other.
//!
//! # Usage
//!
//! ```rust,ignore
//! let backend: Arc<dyn PageLayoutBackend> = Arc::new(LopdfBackend::new());
//! if backend.is_available() {
//!     let pdf = backend.render(&PageLayout::from_request(&request))?;
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::export::{FlowDocument, PageLayout};

/// Renders the flow model (word-processor document).
///
/// # Contract
///
/// Implementations must:
/// - Return byte-identical output for equal input
/// - Report `is_available() == false` rather than failing every render
pub trait FlowDocumentBackend: Send + Sync {
    /// Whether this backend can render in the current runtime.
    fn is_available(&self) -> bool;

    /// Serialize a flow document into its native container.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::RenderFailed` if serialization fails.
    fn render(&self, document: &FlowDocument) -> Result<Vec<u8>, ExportError>;
}

/// Renders the page-layout model (paginated document).
///
/// Same contract as [`FlowDocumentBackend`].
pub trait PageLayoutBackend: Send + Sync {
    fn is_available(&self) -> bool;

    fn render(&self, layout: &PageLayout) -> Result<Vec<u8>, ExportError>;
}

/// Export formats offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// PDF document (page-layout model).
    Pdf,
    /// Word document (flow model).
    Docx,
    /// Header block plus raw markdown.
    Markdown,
}

impl ExportFormat {
    /// All formats, in the order they are offered.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Docx, ExportFormat::Markdown];

    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Markdown => "text/markdown",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Markdown => "md",
        }
    }

    /// Human-facing name, e.g. for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
            ExportFormat::Markdown => "Markdown",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Docx => write!(f, "docx"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" | "word" => Ok(ExportFormat::Docx),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and download metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document named `{base_filename}.{ext}`.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    /// Create a download named `lesson_plan_{subject}_{topic}.{ext}`.
    pub fn for_lesson(content: Vec<u8>, format: ExportFormat, subject: &str, topic: &str) -> Self {
        let base = format!("lesson_plan_{}_{}", subject, topic);
        Self::new(content, format, &sanitize_filename(&base))
    }
}

/// Replaces characters that break a `Content-Disposition` filename or a path.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The backend for this format is not present in this runtime.
    #[error("{} export is not available", .0.display_name())]
    Unavailable(ExportFormat),

    /// The backend failed while serializing.
    #[error("{} rendering failed: {reason}", .format.display_name())]
    RenderFailed { format: ExportFormat, reason: String },
}

impl ExportError {
    /// Create a render failure.
    pub fn render_failed(format: ExportFormat, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            format,
            reason: reason.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
