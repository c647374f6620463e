//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, session context)
//! - `export` - Markdown classification and the document models it renders into
//! - `lesson` - Lesson plan aggregate and prompt templates

pub mod export;
pub mod foundation;
pub mod lesson;
