//! Room repository

use crate::domain::{CreateRoomInput, Room, StringUuid, UpdateRoomInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, hotel_id: StringUuid, input: &CreateRoomInput) -> Result<Room>;
    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<Room>>;
    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Room>>;
    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64>;
    async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: &UpdateRoomInput,
    ) -> Result<Room>;
    async fn delete(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()>;
}

pub struct RoomRepositoryImpl {
    pool: MySqlPool,
}

impl RoomRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, hotel_id: StringUuid, input: &CreateRoomInput) -> Result<Room> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO rooms (id, hotel_id, room_type_id, name, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .bind(input.room_type_id)
        .bind(&input.name)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create room")))
    }

    async fn find_by_id(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, hotel_id, room_type_id, name, is_active, created_at, updated_at
            FROM rooms
            WHERE id = ? AND hotel_id = ?
            "#,
        )
        .bind(id)
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn list_by_hotel(
        &self,
        hotel_id: StringUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, hotel_id, room_type_id, name, is_active, created_at, updated_at
            FROM rooms
            WHERE hotel_id = ?
            ORDER BY name ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(hotel_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn count_by_hotel(&self, hotel_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE hotel_id = ?")
            .bind(hotel_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: &UpdateRoomInput,
    ) -> Result<Room> {
        let existing = self
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此房間".to_string()))?;

        let room_type_id = input.room_type_id.unwrap_or(existing.room_type_id);
        let name = input.name.as_ref().unwrap_or(&existing.name);
        let is_active = input.is_active.unwrap_or(existing.is_active);

        sqlx::query(
            r#"
            UPDATE rooms
            SET room_type_id = ?, name = ?, is_active = ?, updated_at = NOW()
            WHERE id = ? AND hotel_id = ?
            "#,
        )
        .bind(room_type_id)
        .bind(name)
        .bind(is_active)
        .bind(id)
        .bind(hotel_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update room")))
    }

    async fn delete(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ? AND hotel_id = ?")
            .bind(id)
            .bind(hotel_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("查無此房間".to_string()));
        }

        Ok(())
    }
}
