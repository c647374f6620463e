//! DocumentConverter - turns an ExportRequest into downloadable bytes.
//!
//! Each backend is asked once, at construction, whether it can run. An
//! unavailable backend is dropped and its format answers `Ok(None)`; the
//! other formats keep working. Markdown export needs no backend.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::export::{render_markdown, ExportRequest, FlowDocument, PageLayout};
use crate::ports::{
    ExportError, ExportFormat, ExportedDocument, FlowDocumentBackend, PageLayoutBackend,
};

/// Which formats can currently be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportCapabilities {
    pub pdf: bool,
    pub docx: bool,
    pub markdown: bool,
}

impl ExportCapabilities {
    pub fn supports(&self, format: ExportFormat) -> bool {
        match format {
            ExportFormat::Pdf => self.pdf,
            ExportFormat::Docx => self.docx,
            ExportFormat::Markdown => self.markdown,
        }
    }
}

/// Stateless converter over the injected export backends.
#[derive(Clone)]
pub struct DocumentConverter {
    flow: Option<Arc<dyn FlowDocumentBackend>>,
    page: Option<Arc<dyn PageLayoutBackend>>,
}

impl DocumentConverter {
    pub fn new(flow: Arc<dyn FlowDocumentBackend>, page: Arc<dyn PageLayoutBackend>) -> Self {
        let flow = flow.is_available().then_some(flow);
        let page = page.is_available().then_some(page);

        if flow.is_none() {
            tracing::warn!("DOCX backend unavailable; Word export disabled");
        }
        if page.is_none() {
            tracing::warn!("PDF backend unavailable; PDF export disabled");
        }

        Self { flow, page }
    }

    pub fn capabilities(&self) -> ExportCapabilities {
        ExportCapabilities {
            pdf: self.page.is_some(),
            docx: self.flow.is_some(),
            markdown: true,
        }
    }

    /// Renders the flow model, or `None` when no DOCX backend is present.
    pub fn to_docx(&self, request: &ExportRequest) -> Result<Option<Vec<u8>>, ExportError> {
        let Some(backend) = &self.flow else {
            return Ok(None);
        };
        backend.render(&FlowDocument::from_request(request)).map(Some)
    }

    /// Renders the page-layout model, or `None` when no PDF backend is present.
    pub fn to_pdf(&self, request: &ExportRequest) -> Result<Option<Vec<u8>>, ExportError> {
        let Some(backend) = &self.page else {
            return Ok(None);
        };
        backend.render(&PageLayout::from_request(request)).map(Some)
    }

    pub fn to_markdown(&self, request: &ExportRequest) -> String {
        render_markdown(request)
    }

    /// Renders one format and wraps it with its download name and MIME type.
    pub fn export(
        &self,
        format: ExportFormat,
        request: &ExportRequest,
    ) -> Result<Option<ExportedDocument>, ExportError> {
        let bytes = match format {
            ExportFormat::Pdf => self.to_pdf(request)?,
            ExportFormat::Docx => self.to_docx(request)?,
            ExportFormat::Markdown => Some(self.to_markdown(request).into_bytes()),
        };

        Ok(bytes.map(|content| {
            tracing::info!(format = %format, bytes = content.len(), "Document exported");
            ExportedDocument::for_lesson(content, format, &request.subject, &request.topic)
        }))
    }
}

impl std::fmt::Debug for DocumentConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentConverter")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
