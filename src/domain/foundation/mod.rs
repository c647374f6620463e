//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the lesson planner domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, SessionContext};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PlanId, Username};
pub use timestamp::Timestamp;
