//! Subscription plan domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Billing interval of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlanInterval {
    #[default]
    Month,
    Year,
}

/// Subscription plan entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: StringUuid,
    pub name: String,
    /// Price per billing period in NT$
    pub price: i64,
    pub interval: PlanInterval,
    /// Credits granted to the brand on each successful payment
    pub credit_grant: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            name: String::new(),
            price: 0,
            interval: PlanInterval::Month,
            credit_grant: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a plan (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlanInput {
    #[validate(length(min = 1, max = 100, message = "方案名稱為必填"))]
    pub name: String,
    #[validate(range(min = 0, message = "方案價格不可為負數"))]
    pub price: i64,
    #[serde(default)]
    pub interval: PlanInterval,
    #[validate(range(min = 0, message = "贈送點數不可為負數"))]
    #[serde(default)]
    pub credit_grant: i64,
}

/// Input for updating a plan (admin)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlanInput {
    #[validate(length(min = 1, max = 100, message = "方案名稱不可為空"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "方案價格不可為負數"))]
    pub price: Option<i64>,
    pub interval: Option<PlanInterval>,
    #[validate(range(min = 0, message = "贈送點數不可為負數"))]
    pub credit_grant: Option<i64>,
    pub is_active: Option<bool>,
}
