//! Product domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Product entity - an add-on item sold by a hotel (breakfast, spa, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: StringUuid,
    pub hotel_id: StringUuid,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in NT$
    pub price: i64,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Product {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            hotel_id: StringUuid::new_v4(),
            name: String::new(),
            description: None,
            price: 0,
            stock: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 100, message = "商品名稱為必填"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "商品價格不可為負數"))]
    pub price: i64,
    #[validate(range(min = 0, message = "商品庫存不可為負數"))]
    #[serde(default)]
    pub stock: i32,
}

/// Input for updating a product
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 100, message = "商品名稱不可為空"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "商品價格不可為負數"))]
    pub price: Option<i64>,
    #[validate(range(min = 0, message = "商品庫存不可為負數"))]
    pub stock: Option<i32>,
}
