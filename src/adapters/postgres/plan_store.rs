//! PostgreSQL implementation of PlanStore.

use async_trait::async_trait;
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp, Username};
use crate::domain::lesson::{LessonPlan, LessonRequest};
use crate::ports::PlanStore;

const SELECT_PLAN: &str = r#"
    SELECT id, username, subject, topic, grade, duration, objectives,
           customization, content, created_at
    FROM lesson_plans
"#;

/// Saved plans in the `lesson_plans` table.
#[derive(Clone)]
pub struct PostgresPlanStore {
    pool: PgPool,
}

impl PostgresPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &PlanId) -> DomainError {
    DomainError::new(ErrorCode::PlanNotFound, format!("Lesson plan not found: {}", id))
        .with_detail("plan_id", id.to_string())
}

#[async_trait]
impl PlanStore for PostgresPlanStore {
    async fn insert(&self, plan: &LessonPlan) -> Result<(), DomainError> {
        let request = plan.request();
        sqlx::query(
            r#"
            INSERT INTO lesson_plans (
                id, username, subject, topic, grade, duration, objectives,
                customization, content, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(plan.id().as_uuid())
        .bind(plan.owner().as_str())
        .bind(request.subject())
        .bind(request.topic())
        .bind(request.grade())
        .bind(request.duration())
        .bind(request.objectives())
        .bind(request.customization())
        .bind(plan.content())
        .bind(plan.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert lesson plan: {}", e)))?;

        Ok(())
    }

    async fn find(&self, id: &PlanId) -> Result<Option<LessonPlan>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_PLAN))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch lesson plan: {}", e)))?;

        row.map(row_to_plan).transpose()
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<LessonPlan>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE username = $1 ORDER BY created_at DESC",
            SELECT_PLAN
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list lesson plans: {}", e)))?;

        rows.into_iter().map(row_to_plan).collect()
    }

    async fn update_content(&self, id: &PlanId, content: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE lesson_plans SET content = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(content)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update lesson plan: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: &PlanId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM lesson_plans WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete lesson plan: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_plan(row: PgRow) -> Result<LessonPlan, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let owner: String = column(&row, "username")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    let request = LessonRequest::new(
        column::<String>(&row, "subject")?,
        column::<String>(&row, "topic")?,
        column::<String>(&row, "grade")?,
        column::<String>(&row, "duration")?,
        column::<String>(&row, "objectives")?,
    )
    .map_err(|e| DomainError::database(format!("Stored lesson request is invalid: {}", e)))?
    .with_customization(column(&row, "customization")?);

    let owner = Username::new(owner)
        .map_err(|e| DomainError::database(format!("Stored username is invalid: {}", e)))?;

    Ok(LessonPlan::reconstitute(
        PlanId::from_uuid(id),
        owner,
        request,
        column::<String>(&row, "content")?,
        Timestamp::from_datetime(created_at),
    ))
}
