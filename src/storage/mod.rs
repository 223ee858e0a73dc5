pub mod collection;
pub mod id_allocator;
pub mod persistence;

pub use collection::{CAPACITY_TOLERANCE, CollectionInfo, VehicleCollection};
pub use id_allocator::IdAllocator;
pub use persistence::FileManager;
