//! Export module - the document models a lesson plan is converted into.
//!
//! Conversion happens in two steps. The markdown body is classified line by
//! line ([`markdown`]), then accumulated into one of two target models:
//!
//! - [`FlowDocument`] - sequential styled blocks for a word-processor engine
//! - [`PageLayout`] - typeset items for a paginating engine
//!
//! Both models are pure functions of an [`ExportRequest`]. Turning a model
//! into bytes is the job of an export backend (see `ports::export_backend`).

mod flow;
mod layout;
pub mod markdown;
mod markdown_export;
mod request;
mod style;

pub use flow::{BlockStyle, FlowBlock, FlowDocument};
pub use layout::{PageGeometry, PageItem, PageLayout, TextStyle, POINTS_PER_INCH};
pub use markdown::{HeadingLevel, MarkdownLine};
pub use markdown_export::render_markdown;
pub use request::{ExportRequest, CREATED_PLACEHOLDER};
pub use style::{Alignment, Rgb, TextRun};
