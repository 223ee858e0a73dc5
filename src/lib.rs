// ============================================================================
// Vehicle Registry Library
// ============================================================================

pub mod core;
pub mod model;
pub mod storage;
pub mod codec;
pub mod facade;

// Re-export main types for convenience
pub use facade::VehicleRegistry;
pub use crate::core::{RegistryConfig, Result, StoreError, ValidationError};
pub use model::{Coordinates, FuelType, NaturalKey, Vehicle, VehicleDraft, VehicleId, VehicleType};
pub use storage::{CollectionInfo, FileManager, IdAllocator, VehicleCollection};
