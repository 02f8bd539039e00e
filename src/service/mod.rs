//! Business logic layer

mod credit;
mod hotel;
mod image;
mod payment;
mod product;
mod room;
mod room_type;
mod subscription;

pub use credit::CreditService;
pub use hotel::HotelService;
pub use image::ImageService;
pub use payment::PaymentService;
pub use product::ProductService;
pub use room::RoomService;
pub use room_type::RoomTypeService;
pub use subscription::SubscriptionService;
