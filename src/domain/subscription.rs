//! Subscription domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Subscription status
///
/// `pending` until the first payment is captured; activation happens only
/// through the payment notify flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Pending,
    Active,
    Canceled,
    Expired,
}

/// Subscription entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: StringUuid,
    pub brand_id: StringUuid,
    pub plan_id: StringUuid,
    pub status: SubscriptionStatus,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Subscription {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            brand_id: StringUuid::new_v4(),
            plan_id: StringUuid::new_v4(),
            status: SubscriptionStatus::Pending,
            current_period_start: None,
            current_period_end: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for subscribing to a plan
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubscribeInput {
    pub plan_id: StringUuid,
}
