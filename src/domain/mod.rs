//! Domain models

mod brand;
mod common;
mod credit;
mod hotel;
mod image;
mod order;
mod plan;
mod product;
mod room;
mod room_type;
mod subscription;

pub use brand::Brand;
pub use common::StringUuid;
pub use credit::{
    CreateCreditPackageInput, CreditBalance, CreditPackage, CreditPurchase, PurchaseInput,
    PurchaseStatus, UpdateCreditPackageInput,
};
pub use hotel::{CreateHotelInput, Hotel, UpdateHotelInput};
pub use image::{CreateImageInput, Image, ImageKind};
pub use order::{generate_order_no, CheckoutResponse, NewOrder, Order, OrderKind, OrderStatus};
pub use plan::{CreatePlanInput, Plan, PlanInterval, UpdatePlanInput};
pub use product::{CreateProductInput, Product, UpdateProductInput};
pub use room::{CreateRoomInput, Room, UpdateRoomInput};
pub use room_type::{CreateRoomTypeInput, RoomType, UpdateRoomTypeInput};
pub use subscription::{SubscribeInput, Subscription, SubscriptionStatus};
