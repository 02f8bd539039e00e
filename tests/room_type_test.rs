//! Room type repository integration tests

use roomly_core::domain::{CreateHotelInput, CreateRoomTypeInput, StringUuid, UpdateRoomTypeInput};
use roomly_core::repository::hotel::HotelRepositoryImpl;
use roomly_core::repository::room_type::RoomTypeRepositoryImpl;
use roomly_core::repository::{HotelRepository, RoomTypeRepository};
use roomly_core::AppError;

mod common;

fn hotel_input(name: &str) -> CreateHotelInput {
    CreateHotelInput {
        name: name.to_string(),
        address: "台北市信義區松高路 1 號".to_string(),
        phone: "02-2720-0000".to_string(),
        description: None,
    }
}

fn room_type_input(name: &str) -> CreateRoomTypeInput {
    CreateRoomTypeInput {
        name: name.to_string(),
        description: None,
        base_price: 3200,
        capacity: 2,
    }
}

#[tokio::test]
async fn test_scoped_lookups_isolated_across_hotels() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };

    common::setup_database(&pool).await.unwrap();
    common::cleanup_database(&pool).await.unwrap();

    let hotel_repo = HotelRepositoryImpl::new(pool.clone());
    let repo = RoomTypeRepositoryImpl::new(pool.clone());

    let brand_a = common::seed_brand(&pool, StringUuid::new_v4()).await.unwrap();
    let brand_b = common::seed_brand(&pool, StringUuid::new_v4()).await.unwrap();
    let hotel_a = hotel_repo.create(brand_a, &hotel_input("飯店甲")).await.unwrap();
    let hotel_b = hotel_repo.create(brand_b, &hotel_input("飯店乙")).await.unwrap();

    let rt_a = repo
        .create(hotel_a.id, &room_type_input("豪華雙人房"))
        .await
        .unwrap();
    repo.create(hotel_b.id, &room_type_input("標準單人房"))
        .await
        .unwrap();

    // A row under another hotel is invisible to the scoped lookup
    let cross = repo.find_by_id(rt_a.id, hotel_b.id).await.unwrap();
    assert!(cross.is_none());

    let own = repo.find_by_id(rt_a.id, hotel_a.id).await.unwrap();
    assert_eq!(own.unwrap().name, "豪華雙人房");

    // List and count stay mirrored per hotel
    assert_eq!(repo.count_by_hotel(hotel_a.id).await.unwrap(), 1);
    assert_eq!(repo.count_by_hotel(hotel_b.id).await.unwrap(), 1);
    let listed = repo.list_by_hotel(hotel_a.id, 10, 0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, rt_a.id);

    // Scoped update under the wrong hotel is NotFound, never a silent success
    let result = repo
        .update(
            rt_a.id,
            hotel_b.id,
            &UpdateRoomTypeInput {
                name: Some("改名".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    common::cleanup_database(&pool).await.unwrap();
}

#[tokio::test]
async fn test_soft_delete_hides_row() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };

    common::setup_database(&pool).await.unwrap();
    common::cleanup_database(&pool).await.unwrap();

    let hotel_repo = HotelRepositoryImpl::new(pool.clone());
    let repo = RoomTypeRepositoryImpl::new(pool.clone());

    let brand = common::seed_brand(&pool, StringUuid::new_v4()).await.unwrap();
    let hotel = hotel_repo.create(brand, &hotel_input("飯店丙")).await.unwrap();
    let rt = repo
        .create(hotel.id, &room_type_input("家庭四人房"))
        .await
        .unwrap();

    repo.deactivate(rt.id, hotel.id).await.unwrap();

    assert!(repo.find_by_id(rt.id, hotel.id).await.unwrap().is_none());
    assert_eq!(repo.count_by_hotel(hotel.id).await.unwrap(), 0);

    // Deactivating again affects zero rows
    let again = repo.deactivate(rt.id, hotel.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    common::cleanup_database(&pool).await.unwrap();
}
