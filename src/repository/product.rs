//! Product repository

use crate::domain::{CreateProductInput, Product, StringUuid, UpdateProductInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, hotel_id: StringUuid, input: &CreateProductInput) -> Result<Product>;
    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<Product>>;
    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>>;
    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64>;
    async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: &UpdateProductInput,
    ) -> Result<Product>;
    async fn deactivate(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()>;
}

pub struct ProductRepositoryImpl {
    pool: MySqlPool,
}

impl ProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, hotel_id: StringUuid, input: &CreateProductInput) -> Result<Product> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO products (id, hotel_id, name, description, price, stock, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create product")))
    }

    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, hotel_id, name, description, price, stock, is_active, created_at, updated_at
            FROM products
            WHERE id = ? AND hotel_id = ? AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, hotel_id, name, description, price, stock, is_active, created_at, updated_at
            FROM products
            WHERE hotel_id = ? AND is_active = 1
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(hotel_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE hotel_id = ? AND is_active = 1")
                .bind(hotel_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: &UpdateProductInput,
    ) -> Result<Product> {
        let existing = self
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此商品".to_string()))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let description = input.description.as_ref().or(existing.description.as_ref());
        let price = input.price.unwrap_or(existing.price);
        let stock = input.stock.unwrap_or(existing.stock);

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, stock = ?, updated_at = NOW()
            WHERE id = ? AND hotel_id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(stock)
        .bind(id)
        .bind(hotel_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update product")))
    }

    async fn deactivate(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET is_active = 0, updated_at = NOW()
            WHERE id = ? AND hotel_id = ? AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此商品".to_string()));
        }

        Ok(())
    }
}
