//! Brand domain model
//!
//! Brands are created during store registration on the upstream auth service;
//! this backend only reads them and maintains the credit balance.

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Brand entity - the tenant that owns hotels and their resources
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: StringUuid,
    /// Owning user on the auth service
    pub user_id: StringUuid,
    pub name: String,
    pub credit_balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Brand {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            user_id: StringUuid::new_v4(),
            name: String::new(),
            credit_balance: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
