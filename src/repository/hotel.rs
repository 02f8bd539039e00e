//! Hotel repository

use crate::domain::{CreateHotelInput, Hotel, StringUuid, UpdateHotelInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, brand_id: StringUuid, input: &CreateHotelInput) -> Result<Hotel>;
    async fn find_by_id(&self, id: StringUuid, brand_id: StringUuid) -> Result<Option<Hotel>>;
    /// The brand's oldest hotel; the scope resolver treats it as the active
    /// one ("first hotel wins")
    async fn first_by_brand(&self, brand_id: StringUuid) -> Result<Option<Hotel>>;
    async fn update(
        &self,
        id: StringUuid,
        brand_id: StringUuid,
        input: &UpdateHotelInput,
    ) -> Result<Hotel>;
}

pub struct HotelRepositoryImpl {
    pool: MySqlPool,
}

impl HotelRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const HOTEL_COLUMNS: &str =
    "id, brand_id, name, address, phone, description, created_at, updated_at";

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn create(&self, brand_id: StringUuid, input: &CreateHotelInput) -> Result<Hotel> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO hotels (id, brand_id, name, address, phone, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(brand_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.description)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, brand_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create hotel")))
    }

    async fn find_by_id(&self, id: StringUuid, brand_id: StringUuid) -> Result<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = ? AND brand_id = ?"
        ))
        .bind(id)
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    async fn first_by_brand(&self, brand_id: StringUuid) -> Result<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE brand_id = ? ORDER BY created_at ASC, id ASC LIMIT 1"
        ))
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    async fn update(
        &self,
        id: StringUuid,
        brand_id: StringUuid,
        input: &UpdateHotelInput,
    ) -> Result<Hotel> {
        let existing = self
            .find_by_id(id, brand_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無飯店資料".to_string()))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let address = input.address.as_ref().unwrap_or(&existing.address);
        let phone = input.phone.as_ref().unwrap_or(&existing.phone);
        let description = input.description.as_ref().or(existing.description.as_ref());

        sqlx::query(
            r#"
            UPDATE hotels
            SET name = ?, address = ?, phone = ?, description = ?, updated_at = NOW()
            WHERE id = ? AND brand_id = ?
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(description)
        .bind(id)
        .bind(brand_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id, brand_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update hotel")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_first_by_brand() {
        let mut mock = MockHotelRepository::new();

        let hotel = Hotel::default();
        let brand_id = hotel.brand_id;
        let hotel_clone = hotel.clone();

        mock.expect_first_by_brand()
            .with(eq(brand_id))
            .returning(move |_| Ok(Some(hotel_clone.clone())));

        let result = mock.first_by_brand(brand_id).await.unwrap();
        assert_eq!(result.unwrap().id, hotel.id);
    }
}
