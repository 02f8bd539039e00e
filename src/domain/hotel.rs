//! Hotel domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Hotel entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hotel {
    pub id: StringUuid,
    pub brand_id: StringUuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Hotel {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            brand_id: StringUuid::new_v4(),
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a hotel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHotelInput {
    #[validate(length(min = 1, max = 100, message = "飯店名稱為必填"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "飯店地址為必填"))]
    pub address: String,
    #[validate(length(min = 1, max = 30, message = "飯店電話為必填"))]
    pub phone: String,
    pub description: Option<String>,
}

/// Input for updating a hotel
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHotelInput {
    #[validate(length(min = 1, max = 100, message = "飯店名稱不可為空"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "飯店地址不可為空"))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 30, message = "飯店電話不可為空"))]
    pub phone: Option<String>,
    pub description: Option<String>,
}
