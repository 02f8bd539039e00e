//! Image repository

use crate::domain::{CreateImageInput, Image, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn create(&self, hotel_id: StringUuid, input: &CreateImageInput) -> Result<Image>;
    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<Image>>;
    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Image>>;
    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64>;
    async fn delete(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()>;
}

pub struct ImageRepositoryImpl {
    pool: MySqlPool,
}

impl ImageRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for ImageRepositoryImpl {
    async fn create(&self, hotel_id: StringUuid, input: &CreateImageInput) -> Result<Image> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO images (id, hotel_id, kind, target_id, url, sort_order, created_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .bind(input.kind)
        .bind(input.target_id)
        .bind(&input.url)
        .bind(input.sort_order)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create image")))
    }

    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(
            r#"
            SELECT id, hotel_id, kind, target_id, url, sort_order, created_at
            FROM images
            WHERE id = ? AND hotel_id = ?
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(
            r#"
            SELECT id, hotel_id, kind, target_id, url, sort_order, created_at
            FROM images
            WHERE hotel_id = ?
            ORDER BY sort_order ASC, created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(hotel_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM images WHERE hotel_id = ?")
            .bind(hotel_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM images WHERE id = ? AND hotel_id = ?")
            .bind(id)
            .bind(hotel_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此圖片".to_string()));
        }

        Ok(())
    }
}
