//! Room type business logic

use crate::domain::{CreateRoomTypeInput, RoomType, StringUuid, UpdateRoomTypeInput};
use crate::error::{AppError, Result};
use crate::repository::{paginate, Page, RoomTypeRepository};
use std::sync::Arc;
use validator::Validate;

pub struct RoomTypeService<R: RoomTypeRepository> {
    repo: Arc<R>,
}

impl<R: RoomTypeRepository> RoomTypeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        hotel_id: StringUuid,
        page: i64,
        per_page: i64,
    ) -> Result<Page<RoomType>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.repo.list_by_hotel(hotel_id, limit, offset),
            || self.repo.count_by_hotel(hotel_id),
        )
        .await
    }

    pub async fn get(&self, id: StringUuid, hotel_id: StringUuid) -> Result<RoomType> {
        self.repo
            .find_by_id(id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此房型".to_string()))
    }

    pub async fn create(
        &self,
        hotel_id: StringUuid,
        input: CreateRoomTypeInput,
    ) -> Result<RoomType> {
        input.validate()?;
        self.repo.create(hotel_id, &input).await
    }

    pub async fn update(
        &self,
        id: StringUuid,
        hotel_id: StringUuid,
        input: UpdateRoomTypeInput,
    ) -> Result<RoomType> {
        input.validate()?;
        self.repo.update(id, hotel_id, &input).await
    }

    pub async fn remove(&self, id: StringUuid, hotel_id: StringUuid) -> Result<()> {
        self.repo.deactivate(id, hotel_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::room_type::MockRoomTypeRepository;
    use mockall::predicate::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_composes_pagination() {
        let mut mock = MockRoomTypeRepository::new();
        let hotel_id = StringUuid::new_v4();

        mock.expect_list_by_hotel()
            .with(eq(hotel_id), eq(10), eq(10))
            .returning(|_, _, _| Ok(vec![RoomType::default()]));
        mock.expect_count_by_hotel()
            .with(eq(hotel_id))
            .returning(|_| Ok(11));

        let service = RoomTypeService::new(Arc::new(mock));
        let page = service.list(hotel_id, 2, 10).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.pagination.total_items, 11);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.current_page, 2);
    }

    #[tokio::test]
    async fn test_get_wrong_tenant_is_not_found() {
        let mut mock = MockRoomTypeRepository::new();
        mock.expect_find_by_id().returning(|_, _| Ok(None));

        let service = RoomTypeService::new(Arc::new(mock));
        let result = service
            .get(StringUuid::new_v4(), StringUuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = RoomTypeService::new(Arc::new(MockRoomTypeRepository::new()));

        let result = service
            .create(
                StringUuid::new_v4(),
                CreateRoomTypeInput {
                    name: String::new(),
                    description: None,
                    base_price: 2800,
                    capacity: 2,
                },
            )
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "房型名稱為必填"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remove_propagates_not_found() {
        let mut mock = MockRoomTypeRepository::new();
        mock.expect_deactivate()
            .returning(|_, _| Err(AppError::NotFound("查無此房型".to_string())));

        let service = RoomTypeService::new(Arc::new(mock));
        let result = service
            .remove(StringUuid::new_v4(), StringUuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
