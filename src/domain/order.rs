//! Order domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What an order pays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderKind {
    #[default]
    Subscription,
    CreditPackage,
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// Order entity - one payment attempt against the gateway
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: StringUuid,
    /// Human-readable merchant order number, unique, sent to the gateway
    pub order_no: String,
    pub brand_id: StringUuid,
    pub kind: OrderKind,
    /// Subscription id or credit package id, depending on `kind`
    pub item_id: StringUuid,
    /// Amount in NT$
    pub amount: i64,
    pub status: OrderStatus,
    /// Transaction reference assigned by the gateway
    pub provider_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Order {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            order_no: generate_order_no(),
            brand_id: StringUuid::new_v4(),
            kind: OrderKind::Subscription,
            item_id: StringUuid::new_v4(),
            amount: 0,
            status: OrderStatus::Pending,
            provider_ref: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for inserting a new pending order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_no: String,
    pub brand_id: StringUuid,
    pub kind: OrderKind,
    pub item_id: StringUuid,
    pub amount: i64,
}

/// Checkout details returned to the caller after an order is created
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order_no: String,
    pub checkout_url: String,
}

/// Generate a merchant order number: `RO` + timestamp + 4 random digits
pub fn generate_order_no() -> String {
    let ts = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u16 = rand::thread_rng().gen_range(0..10000);
    format!("RO{}{:04}", ts, suffix)
}
