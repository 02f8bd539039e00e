//! Room domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Room entity - a physical room assigned to a room type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: StringUuid,
    pub hotel_id: StringUuid,
    pub room_type_id: StringUuid,
    /// Room number or label, e.g. "801"
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Room {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            hotel_id: StringUuid::new_v4(),
            room_type_id: StringUuid::new_v4(),
            name: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomInput {
    pub room_type_id: StringUuid,
    #[validate(length(min = 1, max = 50, message = "房間名稱為必填"))]
    pub name: String,
}

/// Input for updating a room
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoomInput {
    pub room_type_id: Option<StringUuid>,
    #[validate(length(min = 1, max = 50, message = "房間名稱不可為空"))]
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
