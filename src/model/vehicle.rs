use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Local, NaiveDate};

use super::{Coordinates, FuelType, VehicleType};
use crate::core::ValidationError;

pub type VehicleId = u32;

/// User-supplied vehicle fields.
///
/// Everything except the identifier and the creation date, which are owned
/// by the collection. A draft is unchecked until it becomes a [`Vehicle`].
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub name: String,
    pub coordinates: Coordinates,
    pub engine_power: f64,
    pub capacity: f64,
    pub vehicle_type: VehicleType,
    pub fuel_type: Option<FuelType>,
}

impl VehicleDraft {
    pub fn new(
        name: impl Into<String>,
        coordinates: Coordinates,
        engine_power: f64,
        capacity: f64,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            name: name.into(),
            coordinates,
            engine_power,
            capacity,
            vehicle_type,
            fuel_type: None,
        }
    }

    pub fn fuel_type(mut self, fuel_type: Option<FuelType>) -> Self {
        self.fuel_type = fuel_type;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        super::coordinates::validate_x(self.coordinates.x())?;
        validate_engine_power(self.engine_power)?;
        validate_capacity(self.capacity)?;
        Ok(())
    }
}

/// Anything that takes part in the natural (by-name) order.
pub trait NaturalKey {
    fn natural_key(&self) -> &str;

    fn natural_cmp<O: NaturalKey + ?Sized>(&self, other: &O) -> Ordering {
        self.natural_key().cmp(other.natural_key())
    }
}

impl NaturalKey for VehicleDraft {
    fn natural_key(&self) -> &str {
        self.name.trim()
    }
}

impl NaturalKey for Vehicle {
    fn natural_key(&self) -> &str {
        &self.name
    }
}

/// A managed record. Every instance satisfies the field invariants.
///
/// Equality and hashing use the identifier only; the natural order
/// ([`NaturalKey`]) is by name.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    name: String,
    coordinates: Coordinates,
    creation_date: NaiveDate,
    engine_power: f64,
    capacity: f64,
    vehicle_type: VehicleType,
    fuel_type: Option<FuelType>,
}

impl Vehicle {
    /// Create a vehicle stamped with today's date
    pub fn new(id: VehicleId, draft: VehicleDraft) -> Result<Self, ValidationError> {
        Self::restore(id, Local::now().date_naive(), draft)
    }

    /// Rebuild a vehicle with a known creation date (loading, updating).
    /// The name is stored trimmed.
    pub fn restore(
        id: VehicleId,
        creation_date: NaiveDate,
        draft: VehicleDraft,
    ) -> Result<Self, ValidationError> {
        validate_id(id)?;
        draft.validate()?;

        Ok(Self {
            id,
            name: draft.name.trim().to_string(),
            coordinates: draft.coordinates,
            creation_date,
            engine_power: draft.engine_power,
            capacity: draft.capacity,
            vehicle_type: draft.vehicle_type,
            fuel_type: draft.fuel_type,
        })
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    pub fn engine_power(&self) -> f64 {
        self.engine_power
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn fuel_type(&self) -> Option<FuelType> {
        self.fuel_type
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name.trim().to_string();
        Ok(())
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = coordinates;
    }

    pub fn set_engine_power(&mut self, engine_power: f64) -> Result<(), ValidationError> {
        validate_engine_power(engine_power)?;
        self.engine_power = engine_power;
        Ok(())
    }

    pub fn set_capacity(&mut self, capacity: f64) -> Result<(), ValidationError> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        Ok(())
    }

    pub fn set_vehicle_type(&mut self, vehicle_type: VehicleType) {
        self.vehicle_type = vehicle_type;
    }

    pub fn set_fuel_type(&mut self, fuel_type: Option<FuelType>) {
        self.fuel_type = fuel_type;
    }

    pub(crate) fn assign_id(&mut self, id: VehicleId) {
        self.id = id;
    }

    pub(crate) fn stamp_creation_date(&mut self, date: NaiveDate) {
        self.creation_date = date;
    }

    /// Copy of the user-editable fields
    pub fn to_draft(&self) -> VehicleDraft {
        VehicleDraft {
            name: self.name.clone(),
            coordinates: self.coordinates,
            engine_power: self.engine_power,
            capacity: self.capacity,
            vehicle_type: self.vehicle_type,
            fuel_type: self.fuel_type,
        }
    }

    /// Field-by-field comparison, unlike `==` which only looks at the id
    pub fn same_fields(&self, other: &Vehicle) -> bool {
        self.id == other.id
            && self.creation_date == other.creation_date
            && self.to_draft() == other.to_draft()
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle{{id={}, name='{}', coordinates={}, date={}, enginePower={:.2}, capacity={:.2}, type={}, fuelType={}}}",
            self.id,
            self.name,
            self.coordinates,
            self.creation_date,
            self.engine_power,
            self.capacity,
            self.vehicle_type,
            FuelType::display_optional(self.fuel_type)
        )
    }
}

pub fn validate_id(id: VehicleId) -> Result<(), ValidationError> {
    if id == 0 {
        return Err(ValidationError::new("id", "must be greater than 0"));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name", "must not be empty"));
    }
    Ok(())
}

pub fn validate_engine_power(engine_power: f64) -> Result<(), ValidationError> {
    // `!(x > 0.0)` also rejects NaN
    if !(engine_power > 0.0) {
        return Err(ValidationError::new(
            "enginePower",
            format!("must be greater than 0, got {}", engine_power),
        ));
    }
    Ok(())
}

pub fn validate_capacity(capacity: f64) -> Result<(), ValidationError> {
    if !(capacity > 0.0) {
        return Err(ValidationError::new(
            "capacity",
            format!("must be greater than 0, got {}", capacity),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> VehicleDraft {
        VehicleDraft::new(
            name,
            Coordinates::new(10.0, 2).unwrap(),
            5.0,
            3.0,
            VehicleType::Car,
        )
    }

    #[test]
    fn test_new_vehicle_is_dated_today() {
        let vehicle = Vehicle::new(1, draft("X")).unwrap();
        assert_eq!(vehicle.creation_date(), Local::now().date_naive());
        assert_eq!(vehicle.fuel_type(), None);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert_eq!(Vehicle::new(0, draft("X")).unwrap_err().field, "id");
        assert_eq!(Vehicle::new(1, draft("   ")).unwrap_err().field, "name");

        let mut bad = draft("X");
        bad.engine_power = 0.0;
        assert_eq!(Vehicle::new(1, bad).unwrap_err().field, "enginePower");

        let mut bad = draft("X");
        bad.capacity = -1.0;
        assert_eq!(Vehicle::new(1, bad).unwrap_err().field, "capacity");

        let mut bad = draft("X");
        bad.engine_power = f64::NAN;
        assert!(Vehicle::new(1, bad).is_err());
    }

    #[test]
    fn test_setters_keep_previous_state_on_error() {
        let mut vehicle = Vehicle::new(1, draft("X")).unwrap();
        assert!(vehicle.set_name("").is_err());
        assert!(vehicle.set_capacity(0.0).is_err());
        assert!(vehicle.set_engine_power(-2.0).is_err());
        assert_eq!(vehicle.name(), "X");
        assert_eq!(vehicle.capacity(), 3.0);
        assert_eq!(vehicle.engine_power(), 5.0);

        vehicle.set_name("Y").unwrap();
        assert_eq!(vehicle.name(), "Y");
    }

    #[test]
    fn test_names_are_stored_trimmed() {
        let mut vehicle = Vehicle::new(1, draft("  padded ")).unwrap();
        assert_eq!(vehicle.name(), "padded");
        vehicle.set_name("\tY  ").unwrap();
        assert_eq!(vehicle.name(), "Y");
    }

    #[test]
    fn test_equality_uses_id_only() {
        let a = Vehicle::new(7, draft("A")).unwrap();
        let b = Vehicle::new(7, draft("B")).unwrap();
        let c = Vehicle::new(8, draft("A")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.same_fields(&b));
    }

    #[test]
    fn test_natural_order_by_name() {
        let a = Vehicle::new(2, draft("Alpha")).unwrap();
        let b = Vehicle::new(1, draft("Beta")).unwrap();
        assert_eq!(a.natural_cmp(&b), Ordering::Less);
        assert_eq!(draft("Beta").natural_cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_display_layout() {
        let vehicle = Vehicle::restore(
            1,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            draft("X").fuel_type(Some(FuelType::Gasoline)),
        )
        .unwrap();
        assert_eq!(
            vehicle.to_string(),
            "Vehicle{id=1, name='X', coordinates=(10.0, 2), date=2024-03-01, enginePower=5.00, capacity=3.00, type=CAR, fuelType=GASOLINE}"
        );
    }
}
