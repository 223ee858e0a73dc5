pub mod config;
pub mod error;

pub use config::RegistryConfig;
pub use error::{Result, StoreError, ValidationError};
