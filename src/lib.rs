//! Lesson Planner - AI-assisted lesson plans with document export
//!
//! Teachers describe a lesson; a hosted language model drafts the plan as
//! restricted markdown. Plans are saved per account and converted to DOCX,
//! PDF or Markdown downloads by the document converter.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
