//! Room business logic

use crate::domain::{CreateRoomInput, Room, StringUuid, UpdateRoomInput};
use crate::error::{AppError, Result};
use crate::repository::{paginate, Page, RoomRepository, RoomTypeRepository};
use std::sync::Arc;
use validator::Validate;

pub struct RoomService<R: RoomRepository, RT: RoomTypeRepository> {
    repo: Arc<R>,
    room_type_repo: Arc<RT>,
}

impl<R: RoomRepository, RT: RoomTypeRepository> RoomService<R, RT> {
    pub fn new(repo: Arc<R>, room_type_repo: Arc<RT>) -> Self {
        Self {
            repo,
            room_type_repo,
        }
    }

    /// The referenced room type must live in the same hotel
    async fn ensure_room_type(
        &self,
        room_type_id: StringUuid,
        hotel_id: StringUuid,
    ) -> Result<()> {
        self.room_type_repo
            .find_by_id(room_type_id, hotel_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("指定的房型不存在".to_string()))?;
        Ok(())
    }

    pub async fn list(&self, hotel_id: StringUuid, page: i64, per_page: i64) -> Result<Page<Room>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.repo.list_by_hotel(hotel_id, limit, offset),
            || self.repo.count_by_hotel(hotel_id),
        )
        .await
    }

    pub async fn get(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Room> {
        self.repo
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此房間".to_string()))
    }

    pub async fn create(&self, hotel_id: StringUuid, input: CreateRoomInput) -> Result<Room> {
        input.validate()?;
        self.ensure_room_type(input.room_type_id, hotel_id).await?;
        self.repo.create(hotel_id, &input).await
    }

    pub async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: UpdateRoomInput,
    ) -> Result<Room> {
        input.validate()?;
        if let Some(room_type_id) = input.room_type_id {
            self.ensure_room_type(room_type_id, hotel_id).await?;
        }
        self.repo.update(id, hotel_id, &input).await
    }

    pub async fn remove(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        self.repo.delete(id, hotel_id).await
    }
}
