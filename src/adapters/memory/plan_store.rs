//! In-memory plan store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Username};
use crate::domain::lesson::LessonPlan;
use crate::ports::PlanStore;

/// Saved plans in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanStore {
    plans: Arc<RwLock<Vec<LessonPlan>>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

fn not_found(id: &PlanId) -> DomainError {
    DomainError::new(ErrorCode::PlanNotFound, format!("Lesson plan not found: {}", id))
        .with_detail("plan_id", id.to_string())
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn insert(&self, plan: &LessonPlan) -> Result<(), DomainError> {
        self.plans.write().await.push(plan.clone());
        Ok(())
    }

    async fn find(&self, id: &PlanId) -> Result<Option<LessonPlan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<LessonPlan>, DomainError> {
        let plans = self.plans.read().await;
        // Later saves come first when timestamps tie.
        let mut owned: Vec<LessonPlan> = plans
            .iter()
            .rev()
            .filter(|p| p.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(owned)
    }

    async fn update_content(&self, id: &PlanId, content: &str) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        let plan = plans.iter_mut().find(|p| p.id() == id).ok_or_else(|| not_found(id))?;
        plan.replace_content(content);
        Ok(())
    }

    async fn delete(&self, id: &PlanId) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        let index = plans.iter().position(|p| p.id() == id).ok_or_else(|| not_found(id))?;
        plans.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::lesson::LessonRequest;
    use chrono::{TimeZone, Utc};

    fn request() -> LessonRequest {
        LessonRequest::new("Math", "Algebra", "Grade 8", "45 minutes", "Solve equations").unwrap()
    }

    fn user(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    fn plan_at(owner: &str, day: u32) -> LessonPlan {
        LessonPlan::reconstitute(
            PlanId::new(),
            user(owner),
            request(),
            "# Intro".to_string(),
            Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()),
        )
    }

    #[tokio::test]
    async fn inserted_plan_can_be_found() {
        let store = InMemoryPlanStore::new();
        let plan = plan_at("alice", 1);
        store.insert(&plan).await.unwrap();

        assert_eq!(store.find(plan.id()).await.unwrap(), Some(plan));
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner_and_newest_first() {
        let store = InMemoryPlanStore::new();
        let old = plan_at("alice", 1);
        let new = plan_at("alice", 3);
        let other = plan_at("bob", 2);
        store.insert(&old).await.unwrap();
        store.insert(&other).await.unwrap();
        store.insert(&new).await.unwrap();

        let listed = store.list_by_owner(&user("alice")).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|p| *p.id()).collect();
        assert_eq!(ids, vec![*new.id(), *old.id()]);
    }

    #[tokio::test]
    async fn update_replaces_only_content() {
        let store = InMemoryPlanStore::new();
        let plan = plan_at("alice", 1);
        store.insert(&plan).await.unwrap();

        store.update_content(plan.id(), "# Revised").await.unwrap();

        let stored = store.find(plan.id()).await.unwrap().unwrap();
        assert_eq!(stored.content(), "# Revised");
        assert_eq!(stored.request(), plan.request());
        assert_eq!(stored.created_at(), plan.created_at());
    }

    #[tokio::test]
    async fn delete_removes_plan() {
        let store = InMemoryPlanStore::new();
        let plan = plan_at("alice", 1);
        store.insert(&plan).await.unwrap();

        store.delete(plan.id()).await.unwrap();

        assert!(store.find(plan.id()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn missing_plan_is_not_found_on_update_and_delete() {
        let store = InMemoryPlanStore::new();
        let id = PlanId::new();

        assert_eq!(
            store.update_content(&id, "x").await.unwrap_err().code,
            ErrorCode::PlanNotFound
        );
        assert_eq!(store.delete(&id).await.unwrap_err().code, ErrorCode::PlanNotFound);
    }
}
