//! Image domain model
//!
//! Rows reference URLs already uploaded to the external image store; upload
//! itself is handled upstream.

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// What an image is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ImageKind {
    #[default]
    Hotel,
    RoomType,
    Product,
}

/// Image entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: StringUuid,
    pub hotel_id: StringUuid,
    pub kind: ImageKind,
    /// Room type or product the image belongs to; None for hotel images
    pub target_id: Option<StringUuid>,
    pub url: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            id: StringUuid::new_v4(),
            hotel_id: StringUuid::new_v4(),
            kind: ImageKind::Hotel,
            target_id: None,
            url: String::new(),
            sort_order: 0,
            created_at: Utc::now(),
        }
    }
}

/// Input for registering an uploaded image
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateImageInput {
    #[serde(default)]
    pub kind: ImageKind,
    pub target_id: Option<StringUuid>,
    #[validate(url(message = "圖片網址格式錯誤"))]
    pub url: String,
    #[serde(default)]
    pub sort_order: i32,
}
