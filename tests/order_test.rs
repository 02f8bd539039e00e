//! Order repository integration tests

use roomly_core::domain::{generate_order_no, NewOrder, OrderKind, OrderStatus, StringUuid};
use roomly_core::repository::order::OrderRepositoryImpl;
use roomly_core::repository::OrderRepository;

mod common;

#[tokio::test]
async fn test_mark_paid_transitions_once() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };

    common::setup_database(&pool).await.unwrap();
    common::cleanup_database(&pool).await.unwrap();

    let repo = OrderRepositoryImpl::new(pool.clone());
    let brand = common::seed_brand(&pool, StringUuid::new_v4()).await.unwrap();

    let order = repo
        .create(&NewOrder {
            order_no: generate_order_no(),
            brand_id: brand,
            kind: OrderKind::CreditPackage,
            item_id: StringUuid::new_v4(),
            amount: 450,
        })
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);

    // First transition wins, the replay affects zero rows
    assert_eq!(repo.mark_paid(order.id, "TX-1").await.unwrap(), 1);
    assert_eq!(repo.mark_paid(order.id, "TX-2").await.unwrap(), 0);

    let reloaded = repo
        .find_by_order_no(&order.order_no)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, OrderStatus::Paid);
    assert_eq!(reloaded.provider_ref.as_deref(), Some("TX-1"));
    assert!(reloaded.paid_at.is_some());

    common::cleanup_database(&pool).await.unwrap();
}

#[tokio::test]
async fn test_list_by_brand_is_scoped() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };

    common::setup_database(&pool).await.unwrap();
    common::cleanup_database(&pool).await.unwrap();

    let repo = OrderRepositoryImpl::new(pool.clone());
    let brand_a = common::seed_brand(&pool, StringUuid::new_v4()).await.unwrap();
    let brand_b = common::seed_brand(&pool, StringUuid::new_v4()).await.unwrap();

    for brand_id in [brand_a, brand_a, brand_b] {
        repo.create(&NewOrder {
            order_no: generate_order_no(),
            brand_id,
            kind: OrderKind::Subscription,
            item_id: StringUuid::new_v4(),
            amount: 1200,
        })
        .await
        .unwrap();
    }

    assert_eq!(repo.count_by_brand(brand_a).await.unwrap(), 2);
    assert_eq!(repo.count_by_brand(brand_b).await.unwrap(), 1);

    let page = repo.list_by_brand(brand_a, 10, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|o| o.brand_id == brand_a));

    common::cleanup_database(&pool).await.unwrap();
}
