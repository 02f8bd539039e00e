//! Subscription plan repository

use crate::domain::{CreatePlanInput, Plan, StringUuid, UpdatePlanInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, input: &CreatePlanInput) -> Result<Plan>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Plan>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Plan>>;
    async fn count(&self) -> Result<i64>;
    async fn list_active(&self) -> Result<Vec<Plan>>;
    async fn update(&self, id: StringUuid, input: &UpdatePlanInput) -> Result<Plan>;
    async fn deactivate(&self, id: StringUuid) -> Result<()>;
}

pub struct PlanRepositoryImpl {
    pool: MySqlPool,
}

impl PlanRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PlanRepositoryImpl {
    async fn create(&self, input: &CreatePlanInput) -> Result<Plan> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO plans (id, name, price, `interval`, credit_grant, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.interval)
        .bind(input.credit_grant)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create plan")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Plan>> {
        let plan = sqlx::query_as::<_, Plan>(
            r#"
            SELECT id, name, price, `interval`, credit_grant, is_active, created_at, updated_at
            FROM plans
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Plan>> {
        let plans = sqlx::query_as::<_, Plan>(
            r#"
            SELECT id, name, price, `interval`, credit_grant, is_active, created_at, updated_at
            FROM plans
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plans")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn list_active(&self) -> Result<Vec<Plan>> {
        let plans = sqlx::query_as::<_, Plan>(
            r#"
            SELECT id, name, price, `interval`, credit_grant, is_active, created_at, updated_at
            FROM plans
            WHERE is_active = 1
            ORDER BY price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn update(&self, id: StringUuid, input: &UpdatePlanInput) -> Result<Plan> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此方案".to_string()))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let price = input.price.unwrap_or(existing.price);
        let interval = input.interval.unwrap_or(existing.interval);
        let credit_grant = input.credit_grant.unwrap_or(existing.credit_grant);
        let is_active = input.is_active.unwrap_or(existing.is_active);

        sqlx::query(
            r#"
            UPDATE plans
            SET name = ?, price = ?, `interval` = ?, credit_grant = ?, is_active = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(interval)
        .bind(credit_grant)
        .bind(is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update plan")))
    }

    async fn deactivate(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE plans SET is_active = 0, updated_at = NOW() WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此方案".to_string()));
        }

        Ok(())
    }
}
