pub mod config;
pub mod error;
pub mod storage;
pub mod tenant;
pub mod utils;

pub use config::NasConfig;
pub use error::{ErrorKind, StorageError};
pub use storage::{LocalStorage, StorageBackend};
pub use tenant::TenantStorageService;
