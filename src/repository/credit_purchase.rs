//! Credit purchase repository

use crate::domain::{CreditPurchase, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditPurchaseRepository: Send + Sync {
    async fn create_pending(
        &self,
        brand_id: StringUuid,
        package_id: StringUuid,
        order_id: StringUuid,
        credits: i64,
    ) -> Result<CreditPurchase>;
    async fn find_by_order(&self, order_id: StringUuid) -> Result<Option<CreditPurchase>>;
    async fn list_by_brand(
        &self,
        brand_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CreditPurchase>>;
    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64>;
    /// Flip pending → paid; returns affected rows for idempotency checks
    async fn mark_paid(&self, id: StringUuid) -> Result<u64>;
}

pub struct CreditPurchaseRepositoryImpl {
    pool: MySqlPool,
}

impl CreditPurchaseRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const PURCHASE_COLUMNS: &str =
    "id, brand_id, package_id, order_id, credits, status, created_at, updated_at";

#[async_trait]
impl CreditPurchaseRepository for CreditPurchaseRepositoryImpl {
    async fn create_pending(
        &self,
        brand_id: StringUuid,
        package_id: StringUuid,
        order_id: StringUuid,
        credits: i64,
    ) -> Result<CreditPurchase> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO credit_purchases (id, brand_id, package_id, order_id, credits, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 'pending', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(brand_id)
        .bind(package_id)
        .bind(order_id)
        .bind(credits)
        .execute(&self.pool)
        .await?;

        let purchase = sqlx::query_as::<_, CreditPurchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM credit_purchases WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        purchase
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create credit purchase")))
    }

    async fn find_by_order(&self, order_id: StringUuid) -> Result<Option<CreditPurchase>> {
        let purchase = sqlx::query_as::<_, CreditPurchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM credit_purchases WHERE order_id = ?"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }

    async fn list_by_brand(
        &self,
        brand_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CreditPurchase>> {
        let purchases = sqlx::query_as::<_, CreditPurchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM credit_purchases
             WHERE brand_id = ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        ))
        .bind(brand_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM credit_purchases WHERE brand_id = ?")
            .bind(brand_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn mark_paid(&self, id: StringUuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE credit_purchases
            SET status = 'paid', updated_at = NOW()
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
