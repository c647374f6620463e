//! Lesson module - the lesson plan aggregate and the prompts that produce it.
//!
//! A plan is generated from a [`LessonRequest`], optionally saved, and later
//! regenerated (content replaced) or exported. Prompt text lives in
//! [`prompt`] so the completion adapter never needs to know about lessons.

mod errors;
mod plan;
pub mod prompt;

pub use errors::LessonPlanError;
pub use plan::{LessonPlan, LessonRequest};
