//! Request extractors for authentication and tenant scoping

pub mod auth;

pub use auth::{AdminGuard, BrandScope, Identity, TenantScope};
