//! Tenant storage
//!
//! Maps `(service_code, user_email)` identities onto the managed directory
//! layout and exposes resource-level operations on top of a storage backend.

pub mod layout;
pub mod resource;
pub mod service;

pub use layout::{ResourceHandle, RootLayout, TenantKey};
pub use resource::ByteResource;
pub use service::TenantStorageService;
