//! Brand repository

use crate::domain::{Brand, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Brand>>;
    async fn add_credits(&self, id: StringUuid, credits: i64) -> Result<()>;
}

pub struct BrandRepositoryImpl {
    pool: MySqlPool,
}

impl BrandRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandRepository for BrandRepositoryImpl {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            SELECT id, user_id, name, credit_balance, created_at, updated_at
            FROM brands
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    async fn add_credits(&self, id: StringUuid, credits: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE brands
            SET credit_balance = credit_balance + ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(credits)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此品牌".to_string()));
        }

        Ok(())
    }
}
