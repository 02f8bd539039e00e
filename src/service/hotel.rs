//! Hotel business logic

use crate::domain::{CreateHotelInput, Hotel, StringUuid, UpdateHotelInput};
use crate::error::{AppError, Result};
use crate::repository::HotelRepository;
use std::sync::Arc;
use validator::Validate;

pub struct HotelService<HR: HotelRepository> {
    repo: Arc<HR>,
}

impl<HR: HotelRepository> HotelService<HR> {
    pub fn new(repo: Arc<HR>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, brand_id: StringUuid, input: CreateHotelInput) -> Result<Hotel> {
        input.validate()?;
        self.repo.create(brand_id, &input).await
    }

    pub async fn get(&self, hotel_id: StringUuid, brand_id: StringUuid) -> Result<Hotel> {
        self.repo
            .find_by_id(hotel_id, brand_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無飯店資料".to_string()))
    }

    pub async fn update(
        &self,
        hotel_id: StringUuid,
        brand_id: StringUuid,
        input: UpdateHotelInput,
    ) -> Result<Hotel> {
        input.validate()?;
        self.repo.update(hotel_id, brand_id, &input).await
    }
}
