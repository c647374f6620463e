//! Plan store port.
//!
//! Persists saved lesson plans, one record per save action. Every query
//! that lists plans is scoped to one owner.

use crate::domain::foundation::{DomainError, PlanId, Username};
use crate::domain::lesson::LessonPlan;
use async_trait::async_trait;

/// Store port for saved lesson plans.
///
/// Calls are atomic; a failed call leaves the store unchanged.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Insert a new plan.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, plan: &LessonPlan) -> Result<(), DomainError>;

    /// Find a plan by its ID.
    ///
    /// Returns `None` if not found.
    async fn find(&self, id: &PlanId) -> Result<Option<LessonPlan>, DomainError>;

    /// All plans owned by a user, newest first.
    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<LessonPlan>, DomainError>;

    /// Replace the markdown body of a plan.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_content(&self, id: &PlanId, content: &str) -> Result<(), DomainError>;

    /// Delete a plan.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &PlanId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn PlanStore) {}
    }
}
