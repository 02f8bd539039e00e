//! Room type repository

use crate::domain::{CreateRoomTypeInput, RoomType, StringUuid, UpdateRoomTypeInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomTypeRepository: Send + Sync {
    async fn create(&self, hotel_id: StringUuid, input: &CreateRoomTypeInput) -> Result<RoomType>;
    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<RoomType>>;
    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RoomType>>;
    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64>;
    async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: &UpdateRoomTypeInput,
    ) -> Result<RoomType>;
    async fn deactivate(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()>;
}

pub struct RoomTypeRepositoryImpl {
    pool: MySqlPool,
}

impl RoomTypeRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomTypeRepository for RoomTypeRepositoryImpl {
    async fn create(&self, hotel_id: StringUuid, input: &CreateRoomTypeInput) -> Result<RoomType> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO room_types (id, hotel_id, name, description, base_price, capacity, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.base_price)
        .bind(input.capacity)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create room type")))
    }

    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<RoomType>> {
        let room_type = sqlx::query_as::<_, RoomType>(
            r#"
            SELECT id, hotel_id, name, description, base_price, capacity, is_active, created_at, updated_at
            FROM room_types
            WHERE id = ? AND hotel_id = ? AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room_type)
    }

    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RoomType>> {
        let room_types = sqlx::query_as::<_, RoomType>(
            r#"
            SELECT id, hotel_id, name, description, base_price, capacity, is_active, created_at, updated_at
            FROM room_types
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

        Ok(room_types)
    }

    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM room_types WHERE hotel_id = ? AND is_active = 1",
        )
        .bind(hotel_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: &UpdateRoomTypeInput,
    ) -> Result<RoomType> {
        let existing = self
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此房型".to_string()))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let description = input.description.as_ref().or(existing.description.as_ref());
        let base_price = input.base_price.unwrap_or(existing.base_price);
        let capacity = input.capacity.unwrap_or(existing.capacity);

        sqlx::query(
            r#"
            UPDATE room_types
            SET name = ?, description = ?, base_price = ?, capacity = ?, updated_at = NOW()
            WHERE id = ? AND hotel_id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(base_price)
        .bind(capacity)
        .bind(id)
        .bind(hotel_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update room type")))
    }

    async fn deactivate(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE room_types
            SET is_active = 0, updated_at = NOW()
            WHERE id = ? AND hotel_id = ? AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此房型".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_scoped_lookup() {
        let mut mock = MockRoomTypeRepository::new();

        let room_type = RoomType::default();
        let id = room_type.id;
        let hotel_id = room_type.hotel_id;
        let other_hotel = StringUuid::new_v4();
        let rt = room_type.clone();

        mock.expect_find_by_id()
            .with(eq(id), eq(hotel_id))
            .returning(move |_, _| Ok(Some(rt.clone())));
        mock.expect_find_by_id()
            .with(eq(id), eq(other_hotel))
            .returning(|_, _| Ok(None));

        assert!(mock.find_by_id(id, hotel_id).await.unwrap().is_some());
        assert!(mock.find_by_id(id, other_hotel).await.unwrap().is_none());
    }
}
