//! Credit package repository

use crate::domain::{CreateCreditPackageInput, CreditPackage, StringUuid, UpdateCreditPackageInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditPackageRepository: Send + Sync {
    async fn create(&self, input: &CreateCreditPackageInput) -> Result<CreditPackage>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<CreditPackage>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<CreditPackage>>;
    async fn count(&self) -> Result<i64>;
    async fn list_active(&self) -> Result<Vec<CreditPackage>>;
    async fn update(
        &self,
        id: StringUuid,
        input: &UpdateCreditPackageInput,
    ) -> Result<CreditPackage>;
    async fn deactivate(&self, id: StringUuid) -> Result<()>;
}

pub struct CreditPackageRepositoryImpl {
    pool: MySqlPool,
}

impl CreditPackageRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditPackageRepository for CreditPackageRepositoryImpl {
    async fn create(&self, input: &CreateCreditPackageInput) -> Result<CreditPackage> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO credit_packages (id, name, credits, price, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.credits)
        .bind(input.price)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create credit package")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<CreditPackage>> {
        let package = sqlx::query_as::<_, CreditPackage>(
            r#"
            SELECT id, name, credits, price, is_active, created_at, updated_at
            FROM credit_packages
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(package)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<CreditPackage>> {
        let packages = sqlx::query_as::<_, CreditPackage>(
            r#"
            SELECT id, name, credits, price, is_active, created_at, updated_at
            FROM credit_packages
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM credit_packages")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn list_active(&self) -> Result<Vec<CreditPackage>> {
        let packages = sqlx::query_as::<_, CreditPackage>(
            r#"
            SELECT id, name, credits, price, is_active, created_at, updated_at
            FROM credit_packages
            WHERE is_active = 1
            ORDER BY price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }

    async fn update(
        &self,
        id: StringUuid,
        input: &UpdateCreditPackageInput,
    ) -> Result<CreditPackage> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此儲值方案".to_string()))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let credits = input.credits.unwrap_or(existing.credits);
        let price = input.price.unwrap_or(existing.price);
        let is_active = input.is_active.unwrap_or(existing.is_active);

        sqlx::query(
            r#"
            UPDATE credit_packages
            SET name = ?, credits = ?, price = ?, is_active = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(credits)
        .bind(price)
        .bind(is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update credit package")))
    }

    async fn deactivate(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE credit_packages SET is_active = 0, updated_at = NOW() WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此儲值方案".to_string()));
        }

        Ok(())
    }
}
