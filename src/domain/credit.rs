//! Credit package and purchase domain models

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Credit package entity - a one-off bundle of credits for sale
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CreditPackage {
    pub id: StringUuid,
    pub name: String,
    pub credits: i64,
    /// Price in NT$
    pub price: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for CreditPackage {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            name: String::new(),
            credits: 0,
            price: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a credit package (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCreditPackageInput {
    #[validate(length(min = 1, max = 100, message = "儲值方案名稱為必填"))]
    pub name: String,
    #[validate(range(min = 1, message = "點數至少為 1"))]
    pub credits: i64,
    #[validate(range(min = 0, message = "價格不可為負數"))]
    pub price: i64,
}

/// Input for updating a credit package (admin)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCreditPackageInput {
    #[validate(length(min = 1, max = 100, message = "儲值方案名稱不可為空"))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "點數至少為 1"))]
    pub credits: Option<i64>,
    #[validate(range(min = 0, message = "價格不可為負數"))]
    pub price: Option<i64>,
    pub is_active: Option<bool>,
}

/// Purchase status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// Credit purchase entity - one brand buying one package
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CreditPurchase {
    pub id: StringUuid,
    pub brand_id: StringUuid,
    pub package_id: StringUuid,
    pub order_id: StringUuid,
    /// Credits snapshot at purchase time; the package may change later
    pub credits: i64,
    pub status: PurchaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for CreditPurchase {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            brand_id: StringUuid::new_v4(),
            package_id: StringUuid::new_v4(),
            order_id: StringUuid::new_v4(),
            credits: 0,
            status: PurchaseStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for purchasing a credit package
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchaseInput {
    pub package_id: StringUuid,
}

/// Brand credit balance response
#[derive(Debug, Clone, Serialize)]
pub struct CreditBalance {
    pub balance: i64,
}
