pub mod coordinates;
pub mod kinds;
pub mod vehicle;

pub use coordinates::{Coordinates, MAX_X};
pub use kinds::{FuelType, VehicleType};
pub use vehicle::{NaturalKey, Vehicle, VehicleDraft, VehicleId};
