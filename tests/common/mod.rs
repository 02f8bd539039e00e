//! Common test utilities
//!
//! Integration tests run against a real MySQL pointed to by
//! `TEST_DATABASE_URL` and skip themselves when it is unset.

#![allow(dead_code)]

use roomly_core::domain::StringUuid;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

/// Connect to the test database, or explain why the test should skip
pub async fn get_test_pool() -> Result<MySqlPool, String> {
    let url = std::env::var("TEST_DATABASE_URL")
        .map_err(|_| "TEST_DATABASE_URL not set".to_string())?;

    MySqlPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .map_err(|e| e.to_string())
}

/// Apply migrations (idempotent)
pub async fn setup_database(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Remove all rows, children first
pub async fn cleanup_database(pool: &MySqlPool) -> anyhow::Result<()> {
    for table in [
        "credit_purchases",
        "orders",
        "subscriptions",
        "images",
        "rooms",
        "room_types",
        "products",
        "hotels",
        "brands",
        "plans",
        "credit_packages",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Insert a brand row; brands are normally created by the upstream auth
/// service, so tests seed them directly
pub async fn seed_brand(pool: &MySqlPool, user_id: StringUuid) -> anyhow::Result<StringUuid> {
    let id = StringUuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO brands (id, user_id, name, credit_balance, created_at, updated_at)
        VALUES (?, ?, '測試品牌', 0, NOW(), NOW())
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(id)
}
