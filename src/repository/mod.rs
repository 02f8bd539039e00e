//! Data access layer
//!
//! Every scoped repository follows the same contract: list/count pairs with
//! mirrored filters, joint `(id, tenant id)` lookups, insert-then-reread
//! creates, and zero-row mutations surfacing as NotFound. The `paginate`
//! helper composes a list/count pair into a page.

pub mod brand;
pub mod credit_package;
pub mod credit_purchase;
pub mod hotel;
pub mod image;
pub mod order;
pub mod plan;
pub mod product;
pub mod room;
pub mod room_type;
pub mod subscription;

pub use brand::BrandRepository;
pub use credit_package::CreditPackageRepository;
pub use credit_purchase::CreditPurchaseRepository;
pub use hotel::HotelRepository;
pub use image::ImageRepository;
pub use order::OrderRepository;
pub use plan::PlanRepository;
pub use product::ProductRepository;
pub use room::RoomRepository;
pub use room_type::RoomTypeRepository;
pub use subscription::SubscriptionRepository;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Pagination summary returned alongside page data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

/// One page of rows plus its pagination summary
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

/// Run a bounded fetch and a total count, and assemble the page.
///
/// `fetch` receives `(limit, offset)` with `offset = (current_page - 1) *
/// per_page`. The two statements are independent; under concurrent writes the
/// count and the rows may disagree, which is accepted. Row order is whatever
/// `fetch` produces.
pub async fn paginate<T, F, FFut, C, CFut>(
    current_page: i64,
    per_page: i64,
    fetch: F,
    count: C,
) -> Result<Page<T>>
where
    F: FnOnce(i64, i64) -> FFut,
    FFut: Future<Output = Result<Vec<T>>>,
    C: FnOnce() -> CFut,
    CFut: Future<Output = Result<i64>>,
{
    let offset = (current_page - 1) * per_page;
    let data = fetch(per_page, offset).await?;
    let total_items = count().await?;
    let total_pages = (total_items + per_page - 1) / per_page;

    Ok(Page {
        data,
        pagination: PageMeta {
            current_page,
            per_page,
            total_pages,
            total_items,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    #[case(5, 1, 5)]
    #[case(0, 1, 0)]
    #[tokio::test]
    async fn test_total_pages_is_ceiling(
        #[case] total_items: i64,
        #[case] per_page: i64,
        #[case] expected_pages: i64,
    ) {
        let page = paginate(
            1,
            per_page,
            |_, _| async { Ok(Vec::<i64>::new()) },
            || async move { Ok(total_items) },
        )
        .await
        .unwrap();

        assert_eq!(page.pagination.total_pages, expected_pages);
        assert_eq!(page.pagination.total_items, total_items);
    }

    #[tokio::test]
    async fn test_offset_computed_from_page() {
        let page = paginate(
            3,
            10,
            |limit, offset| async move {
                assert_eq!(limit, 10);
                assert_eq!(offset, 20);
                Ok(vec![1, 2, 3])
            },
            || async { Ok(23) },
        )
        .await
        .unwrap();

        assert_eq!(page.data, vec![1, 2, 3]);
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.pagination.per_page, 10);
    }

    #[tokio::test]
    async fn test_page_meta_serializes_camel_case() {
        let meta = PageMeta {
            current_page: 2,
            per_page: 10,
            total_pages: 5,
            total_items: 42,
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"currentPage\":2"));
        assert!(json.contains("\"perPage\":10"));
        assert!(json.contains("\"totalPages\":5"));
        assert!(json.contains("\"totalItems\":42"));
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let result = paginate(
            1,
            10,
            |_, _| async { Err::<Vec<i64>, _>(crate::AppError::NotFound("x".into())) },
            || async { Ok(0) },
        )
        .await;

        assert!(result.is_err());
    }
}
