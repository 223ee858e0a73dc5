pub mod registry;

pub use registry::VehicleRegistry;
