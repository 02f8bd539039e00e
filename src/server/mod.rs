//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::payment::Gateway;
use crate::repository::{
    brand::BrandRepositoryImpl, credit_package::CreditPackageRepositoryImpl,
    credit_purchase::CreditPurchaseRepositoryImpl, hotel::HotelRepositoryImpl,
    image::ImageRepositoryImpl, order::OrderRepositoryImpl, plan::PlanRepositoryImpl,
    product::ProductRepositoryImpl, room::RoomRepositoryImpl, room_type::RoomTypeRepositoryImpl,
    subscription::SubscriptionRepositoryImpl,
};
use crate::service::{
    CreditService, HotelService, ImageService, PaymentService, ProductService, RoomService,
    RoomTypeService, SubscriptionService,
};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub brand_repo: Arc<BrandRepositoryImpl>,
    pub hotel_repo: Arc<HotelRepositoryImpl>,
    pub hotel_service: Arc<HotelService<HotelRepositoryImpl>>,
    pub room_type_service: Arc<RoomTypeService<RoomTypeRepositoryImpl>>,
    pub room_service: Arc<RoomService<RoomRepositoryImpl, RoomTypeRepositoryImpl>>,
    pub product_service: Arc<ProductService<ProductRepositoryImpl>>,
    pub image_service: Arc<ImageService<ImageRepositoryImpl>>,
    pub subscription_service: Arc<
        SubscriptionService<SubscriptionRepositoryImpl, PlanRepositoryImpl, OrderRepositoryImpl>,
    >,
    pub credit_service: Arc<
        CreditService<
            CreditPackageRepositoryImpl,
            CreditPurchaseRepositoryImpl,
            OrderRepositoryImpl,
            BrandRepositoryImpl,
        >,
    >,
    pub payment_service: Arc<
        PaymentService<
            OrderRepositoryImpl,
            SubscriptionRepositoryImpl,
            PlanRepositoryImpl,
            CreditPurchaseRepositoryImpl,
            BrandRepositoryImpl,
        >,
    >,
}

impl HasServices for AppState {
    type BrandRepo = BrandRepositoryImpl;
    type HotelRepo = HotelRepositoryImpl;
    type RoomTypeRepo = RoomTypeRepositoryImpl;
    type RoomRepo = RoomRepositoryImpl;
    type ProductRepo = ProductRepositoryImpl;
    type ImageRepo = ImageRepositoryImpl;
    type PlanRepo = PlanRepositoryImpl;
    type SubscriptionRepo = SubscriptionRepositoryImpl;
    type CreditPackageRepo = CreditPackageRepositoryImpl;
    type CreditPurchaseRepo = CreditPurchaseRepositoryImpl;
    type OrderRepo = OrderRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn brand_repo(&self) -> &Self::BrandRepo {
        &self.brand_repo
    }

    fn hotel_repo(&self) -> &Self::HotelRepo {
        &self.hotel_repo
    }

    fn hotel_service(&self) -> &HotelService<Self::HotelRepo> {
        &self.hotel_service
    }

    fn room_type_service(&self) -> &RoomTypeService<Self::RoomTypeRepo> {
        &self.room_type_service
    }

    fn room_service(&self) -> &RoomService<Self::RoomRepo, Self::RoomTypeRepo> {
        &self.room_service
    }

    fn product_service(&self) -> &ProductService<Self::ProductRepo> {
        &self.product_service
    }

    fn image_service(&self) -> &ImageService<Self::ImageRepo> {
        &self.image_service
    }

    fn subscription_service(
        &self,
    ) -> &SubscriptionService<Self::SubscriptionRepo, Self::PlanRepo, Self::OrderRepo> {
        &self.subscription_service
    }

    fn credit_service(
        &self,
    ) -> &CreditService<
        Self::CreditPackageRepo,
        Self::CreditPurchaseRepo,
        Self::OrderRepo,
        Self::BrandRepo,
    > {
        &self.credit_service
    }

    fn payment_service(
        &self,
    ) -> &PaymentService<
        Self::OrderRepo,
        Self::SubscriptionRepo,
        Self::PlanRepo,
        Self::CreditPurchaseRepo,
        Self::BrandRepo,
    > {
        &self.payment_service
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    // Create repositories
    let brand_repo = Arc::new(BrandRepositoryImpl::new(db_pool.clone()));
    let hotel_repo = Arc::new(HotelRepositoryImpl::new(db_pool.clone()));
    let room_type_repo = Arc::new(RoomTypeRepositoryImpl::new(db_pool.clone()));
    let room_repo = Arc::new(RoomRepositoryImpl::new(db_pool.clone()));
    let product_repo = Arc::new(ProductRepositoryImpl::new(db_pool.clone()));
    let image_repo = Arc::new(ImageRepositoryImpl::new(db_pool.clone()));
    let plan_repo = Arc::new(PlanRepositoryImpl::new(db_pool.clone()));
    let subscription_repo = Arc::new(SubscriptionRepositoryImpl::new(db_pool.clone()));
    let credit_package_repo = Arc::new(CreditPackageRepositoryImpl::new(db_pool.clone()));
    let credit_purchase_repo = Arc::new(CreditPurchaseRepositoryImpl::new(db_pool.clone()));
    let order_repo = Arc::new(OrderRepositoryImpl::new(db_pool.clone()));

    // Create the JWT manager and the payment gateway client
    let jwt_manager = JwtManager::new(config.jwt.clone());
    let gateway = Arc::new(Gateway::new(config.payment.clone()));

    // Create services
    let hotel_service = Arc::new(HotelService::new(hotel_repo.clone()));
    let room_type_service = Arc::new(RoomTypeService::new(room_type_repo.clone()));
    let room_service = Arc::new(RoomService::new(room_repo, room_type_repo));
    let product_service = Arc::new(ProductService::new(product_repo));
    let image_service = Arc::new(ImageService::new(image_repo));
    let subscription_service = Arc::new(SubscriptionService::new(
        subscription_repo.clone(),
        plan_repo.clone(),
        order_repo.clone(),
        gateway.clone(),
    ));
    let credit_service = Arc::new(CreditService::new(
        credit_package_repo,
        credit_purchase_repo.clone(),
        order_repo.clone(),
        brand_repo.clone(),
        gateway.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        order_repo,
        subscription_repo,
        plan_repo,
        credit_purchase_repo,
        brand_repo.clone(),
        gateway,
    ));

    // Create app state
    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_manager,
        brand_repo,
        hotel_repo,
        hotel_service,
        room_type_service,
        room_service,
        product_service,
        image_service,
        subscription_service,
        credit_service,
        payment_service,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with a generic state type
///
/// Generic over `HasServices` so the same routing works with the production
/// `AppState` and mock-backed test states.
pub fn build_router<S: HasServices>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Public catalog
        .route("/api/v1/plans", get(api::plan::list_active::<S>))
        .route("/api/v1/credit-packages", get(api::credit::list_packages::<S>))
        // Payment gateway callback
        .route("/api/v1/payments/notify", post(api::payment::notify::<S>))
        // Hotel endpoints
        .route("/api/v1/hotels", post(api::hotel::create::<S>))
        .route(
            "/api/v1/hotel",
            get(api::hotel::get::<S>).put(api::hotel::update::<S>),
        )
        // Room type endpoints
        .route(
            "/api/v1/room-types",
            get(api::room_type::list::<S>).post(api::room_type::create::<S>),
        )
        .route(
            "/api/v1/room-types/{id}",
            get(api::room_type::get::<S>)
                .put(api::room_type::update::<S>)
                .delete(api::room_type::remove::<S>),
        )
        // Room endpoints
        .route(
            "/api/v1/rooms",
            get(api::room::list::<S>).post(api::room::create::<S>),
        )
        .route(
            "/api/v1/rooms/{id}",
            get(api::room::get::<S>)
                .put(api::room::update::<S>)
                .delete(api::room::remove::<S>),
        )
        // Product endpoints
        .route(
            "/api/v1/products",
            get(api::product::list::<S>).post(api::product::create::<S>),
        )
        .route(
            "/api/v1/products/{id}",
            get(api::product::get::<S>)
                .put(api::product::update::<S>)
                .delete(api::product::remove::<S>),
        )
        // Image endpoints
        .route(
            "/api/v1/images",
            get(api::image::list::<S>).post(api::image::create::<S>),
        )
        .route("/api/v1/images/{id}", delete(api::image::remove::<S>))
        // Subscription endpoints
        .route("/api/v1/subscriptions", post(api::subscription::subscribe::<S>))
        .route(
            "/api/v1/subscriptions/current",
            get(api::subscription::current::<S>).delete(api::subscription::cancel::<S>),
        )
        // Credit endpoints
        .route(
            "/api/v1/credits/purchases",
            get(api::credit::list_purchases::<S>).post(api::credit::purchase::<S>),
        )
        .route("/api/v1/credits/balance", get(api::credit::balance::<S>))
        // Order history
        .route("/api/v1/orders", get(api::payment::list_orders::<S>))
        // Admin endpoints
        .route(
            "/api/v1/admin/plans",
            get(api::plan::admin_list::<S>).post(api::plan::admin_create::<S>),
        )
        .route(
            "/api/v1/admin/plans/{id}",
            put(api::plan::admin_update::<S>).delete(api::plan::admin_remove::<S>),
        )
        .route(
            "/api/v1/admin/credit-packages",
            get(api::credit::admin_list::<S>).post(api::credit::admin_create::<S>),
        )
        .route(
            "/api/v1/admin/credit-packages/{id}",
            put(api::credit::admin_update::<S>).delete(api::credit::admin_remove::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
