//! Product business logic

use crate::domain::{CreateProductInput, Product, StringUuid, UpdateProductInput};
use crate::error::{AppError, Result};
use crate::repository::{paginate, Page, ProductRepository};
use std::sync::Arc;
use validator::Validate;

pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        hotel_id: StringUuid,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Product>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.repo.list_by_hotel(hotel_id, limit, offset),
            || self.repo.count_by_hotel(hotel_id),
        )
        .await
    }

    pub async fn get(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Product> {
        self.repo
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此商品".to_string()))
    }

    pub async fn create(&self, hotel_id: StringUuid, input: CreateProductInput) -> Result<Product> {
        input.validate()?;
        self.repo.create(hotel_id, &input).await
    }

    pub async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: UpdateProductInput,
    ) -> Result<Product> {
        input.validate()?;
        self.repo.update(id, hotel_id, &input).await
    }

    pub async fn remove(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        self.repo.deactivate(id, hotel_id).await
    }
}
