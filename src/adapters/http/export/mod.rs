//! HTTP adapter for PDF, DOCX and Markdown downloads.

mod handlers;
mod routes;

pub use handlers::ExportHandlers;
pub use routes::{export_routes, plan_export_routes};
