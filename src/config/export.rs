//! Export backend configuration
//!
//! Disabling a format swaps its backend for one that reports itself
//! unavailable; the other formats are unaffected.

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "enabled")]
    pub enable_pdf: bool,

    #[serde(default = "enabled")]
    pub enable_docx: bool,
}

impl ExportConfig {
    /// Every combination is valid; Markdown export is always on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enable_pdf: true,
            enable_docx: true,
        }
    }
}

fn enabled() -> bool {
    true
}
