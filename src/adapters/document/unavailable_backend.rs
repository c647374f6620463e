//! Stand-in backend for a format that is switched off.

use crate::domain::export::{FlowDocument, PageLayout};
use crate::ports::{ExportError, ExportFormat, FlowDocumentBackend, PageLayoutBackend};

/// Reports itself unavailable and refuses every render.
///
/// Wired in place of a real backend when configuration disables a format,
/// so the converter sees the same capability answer it would get from a
/// backend that cannot run.
#[derive(Debug, Clone, Copy)]
pub struct UnavailableBackend {
    format: ExportFormat,
}

impl UnavailableBackend {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }
}

impl FlowDocumentBackend for UnavailableBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _document: &FlowDocument) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Unavailable(self.format))
    }
}

impl PageLayoutBackend for UnavailableBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Unavailable(self.format))
    }
}
