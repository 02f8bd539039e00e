//! Application state traits for dependency injection
//!
//! Handlers and extractors are generic over `HasServices`, so the same code
//! runs against the production `AppState` and mock-backed test states.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    BrandRepository, CreditPackageRepository, CreditPurchaseRepository, HotelRepository,
    ImageRepository, OrderRepository, PlanRepository, ProductRepository, RoomRepository,
    RoomTypeRepository, SubscriptionRepository,
};
use crate::service::{
    CreditService, HotelService, ImageService, PaymentService, ProductService, RoomService,
    RoomTypeService, SubscriptionService,
};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The brand repository type
    type BrandRepo: BrandRepository;
    /// The hotel repository type
    type HotelRepo: HotelRepository;
    /// The room type repository type
    type RoomTypeRepo: RoomTypeRepository;
    /// The room repository type
    type RoomRepo: RoomRepository;
    /// The product repository type
    type ProductRepo: ProductRepository;
    /// The image repository type
    type ImageRepo: ImageRepository;
    /// The plan repository type
    type PlanRepo: PlanRepository;
    /// The subscription repository type
    type SubscriptionRepo: SubscriptionRepository;
    /// The credit package repository type
    type CreditPackageRepo: CreditPackageRepository;
    /// The credit purchase repository type
    type CreditPurchaseRepo: CreditPurchaseRepository;
    /// The order repository type
    type OrderRepo: OrderRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    /// Get the brand repository (used by the scope resolver)
    fn brand_repo(&self) -> &Self::BrandRepo;

    /// Get the hotel repository (used by the scope resolver)
    fn hotel_repo(&self) -> &Self::HotelRepo;

    /// Get the hotel service
    fn hotel_service(&self) -> &HotelService<Self::HotelRepo>;

    /// Get the room type service
    fn room_type_service(&self) -> &RoomTypeService<Self::RoomTypeRepo>;

    /// Get the room service
    fn room_service(&self) -> &RoomService<Self::RoomRepo, Self::RoomTypeRepo>;

    /// Get the product service
    fn product_service(&self) -> &ProductService<Self::ProductRepo>;

    /// Get the image service
    fn image_service(&self) -> &ImageService<Self::ImageRepo>;

    /// Get the subscription service
    fn subscription_service(
        &self,
    ) -> &SubscriptionService<Self::SubscriptionRepo, Self::PlanRepo, Self::OrderRepo>;

    /// Get the credit service
    fn credit_service(
        &self,
    ) -> &CreditService<
        Self::CreditPackageRepo,
        Self::CreditPurchaseRepo,
        Self::OrderRepo,
        Self::BrandRepo,
    >;

    /// Get the payment service
    fn payment_service(
        &self,
    ) -> &PaymentService<
        Self::OrderRepo,
        Self::SubscriptionRepo,
        Self::PlanRepo,
        Self::CreditPurchaseRepo,
        Self::BrandRepo,
    >;

    /// Check if the system is ready (database is healthy)
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
