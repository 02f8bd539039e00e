//! Order repository

use crate::domain::{NewOrder, Order, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, input: &NewOrder) -> Result<Order>;
    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>>;
    async fn list_by_brand(
        &self,
        brand_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>>;
    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64>;
    /// Flip pending → paid; returns affected rows. A concurrent notify loses
    /// the race and sees 0.
    async fn mark_paid(&self, id: StringUuid, provider_ref: &str) -> Result<u64>;
    async fn mark_failed(&self, id: StringUuid) -> Result<u64>;
}

pub struct OrderRepositoryImpl {
    pool: MySqlPool,
}

impl OrderRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const ORDER_COLUMNS: &str = "id, order_no, brand_id, kind, item_id, amount, status, provider_ref, paid_at, created_at, updated_at";

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create(&self, input: &NewOrder) -> Result<Order> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO orders (id, order_no, brand_id, kind, item_id, amount, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 'pending', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.order_no)
        .bind(input.brand_id)
        .bind(input.kind)
        .bind(input.item_id)
        .bind(input.amount)
        .execute(&self.pool)
        .await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        order.ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create order")))
    }

    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_no = ?"
        ))
        .bind(order_no)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn list_by_brand(
        &self,
        brand_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE brand_id = ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        ))
        .bind(brand_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE brand_id = ?")
            .bind(brand_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn mark_paid(&self, id: StringUuid, provider_ref: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'paid', provider_ref = ?, paid_at = NOW(), updated_at = NOW()
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(provider_ref)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn mark_failed(&self, id: StringUuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'failed', updated_at = NOW()
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
