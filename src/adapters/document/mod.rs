//! Document adapters - Export backends for the two document models.
//!
//! - `DocxBackend` - Writes the flow model as a WordprocessingML package
//! - `PdfBackend` - Typesets and paginates the page-layout model with lopdf
//! - `UnavailableBackend` - Placeholder for a format switched off in config

mod docx_backend;
mod pdf_backend;
mod pdf_metrics;
mod unavailable_backend;

pub use docx_backend::DocxBackend;
pub use pdf_backend::PdfBackend;
pub use unavailable_backend::UnavailableBackend;
