//! Subscription repository

use crate::domain::{StringUuid, Subscription};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create_pending(
        &self,
        brand_id: StringUuid,
        plan_id: StringUuid,
    ) -> Result<Subscription>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Subscription>>;
    async fn find_active_by_brand(&self, brand_id: StringUuid) -> Result<Option<Subscription>>;
    /// Flip pending → active with the billing period; returns affected rows
    /// so the caller can detect an already-processed order
    async fn activate(
        &self,
        id: StringUuid,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<u64>;
    async fn cancel_active(&self, brand_id: StringUuid) -> Result<()>;
}

pub struct SubscriptionRepositoryImpl {
    pool: MySqlPool,
}

impl SubscriptionRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SUBSCRIPTION_COLUMNS: &str = "id, brand_id, plan_id, status, current_period_start, current_period_end, created_at, updated_at";

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryImpl {
    async fn create_pending(
        &self,
        brand_id: StringUuid,
        plan_id: StringUuid,
    ) -> Result<Subscription> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, brand_id, plan_id, status, created_at, updated_at)
            VALUES (?, ?, ?, 'pending', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(brand_id)
        .bind(plan_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create subscription")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    async fn find_active_by_brand(&self, brand_id: StringUuid) -> Result<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions
             WHERE brand_id = ? AND status = 'active'
             ORDER BY created_at DESC
             LIMIT 1"
        ))
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    async fn activate(
        &self,
        id: StringUuid,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET status = 'active', current_period_start = ?, current_period_end = ?, updated_at = NOW()
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(period_start)
        .bind(period_end)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn cancel_active(&self, brand_id: StringUuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET status = 'canceled', updated_at = NOW()
            WHERE brand_id = ? AND status = 'active'
            "#,
        )
        .bind(brand_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("目前沒有生效中的訂閱".to_string()));
        }

        Ok(())
    }
}
