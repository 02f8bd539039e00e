//! Room type domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Room type entity - a bookable category of rooms within a hotel
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomType {
    pub id: StringUuid,
    pub hotel_id: StringUuid,
    pub name: String,
    pub description: Option<String>,
    /// Nightly price in NT$
    pub base_price: i64,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for RoomType {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            hotel_id: StringUuid::new_v4(),
            name: String::new(),
            description: None,
            base_price: 0,
            capacity: 2,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a room type
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomTypeInput {
    #[validate(length(min = 1, max = 100, message = "房型名稱為必填"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "房型價格不可為負數"))]
    pub base_price: i64,
    #[validate(range(min = 1, message = "可入住人數至少為 1"))]
    pub capacity: i32,
}

/// Input for updating a room type
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoomTypeInput {
    #[validate(length(min = 1, max = 100, message = "房型名稱不可為空"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "房型價格不可為負數"))]
    pub base_price: Option<i64>,
    #[validate(range(min = 1, message = "可入住人數至少為 1"))]
    pub capacity: Option<i32>,
}
