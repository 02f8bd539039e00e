//! Image business logic

use crate::domain::{CreateImageInput, Image, StringUuid};
use crate::error::{AppError, Result};
use crate::repository::{paginate, ImageRepository, Page};
use std::sync::Arc;
use validator::Validate;

pub struct ImageService<R: ImageRepository> {
    repo: Arc<R>,
}

impl<R: ImageRepository> ImageService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        hotel_id: StringUuid,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Image>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.repo.list_by_hotel(hotel_id, limit, offset),
            || self.repo.count_by_hotel(hotel_id),
        )
        .await
    }

    pub async fn get(&self, id: StringUuid, hotel_id: StringUuid) -> Result<Image> {
        self.repo
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此圖片".to_string()))
    }

    pub async fn create(&self, hotel_id: StringUuid, input: CreateImageInput) -> Result<Image> {
        input.validate()?;
        self.repo.create(hotel_id, &input).await
    }

    pub async fn remove(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        self.repo.delete(id, hotel_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageKind;
    use crate::repository::image::MockImageRepository;

    #[tokio::test]
    async fn test_create_image_rejects_bad_url() {
        let service = ImageService::new(Arc::new(MockImageRepository::new()));

        let result = service
            .create(
                StringUuid::new_v4(),
                CreateImageInput {
                    kind: ImageKind::Hotel,
                    target_id: None,
                    url: "not a url".to_string(),
                    sort_order: 0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_remove_zero_rows_is_not_found() {
        let mut mock = MockImageRepository::new();
        mock.expect_delete()
            .returning(|_, _| Err(AppError::NotFound("查無此圖片".to_string())));

        let service = ImageService::new(Arc::new(mock));
        let result = service
            .remove(StringUuid::new_v4(), StringUuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
