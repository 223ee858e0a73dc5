use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local};
use log::debug;

use super::IdAllocator;
use crate::core::{Result, StoreError, ValidationError};
use crate::model::{NaturalKey, Vehicle, VehicleDraft, VehicleId, VehicleType};

/// Tolerance used when matching capacities
pub const CAPACITY_TOLERANCE: f64 = 0.0001;

/// Snapshot returned by [`VehicleCollection::info`]
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    pub kind: &'static str,
    pub initialized_at: DateTime<Local>,
    pub len: usize,
}

impl fmt::Display for CollectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Collection type: {}", self.kind)?;
        writeln!(f, "Initialized at: {}", self.initialized_at.format("%Y-%m-%d %H:%M:%S"))?;
        write!(f, "Element count: {}", self.len)
    }
}

/// Ordered, identifier-keyed vehicle container.
///
/// Insertion order is kept; the tail is the most recently added element.
/// At most one vehicle per identifier.
#[derive(Debug, Clone)]
pub struct VehicleCollection {
    vehicles: Vec<Vehicle>,
    allocator: IdAllocator,
    initialized_at: DateTime<Local>,
}

impl VehicleCollection {
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            allocator: IdAllocator::new(),
            initialized_at: Local::now(),
        }
    }

    /// Adopt vehicles read from disk, rejecting duplicate identifiers
    pub fn from_loaded(vehicles: Vec<Vehicle>) -> Result<Self> {
        let mut collection = Self::new();
        collection.replace_all(vehicles)?;
        Ok(collection)
    }

    /// Swap the whole contents; on error the collection is left untouched
    pub fn replace_all(&mut self, vehicles: Vec<Vehicle>) -> Result<()> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id()) {
                return Err(StoreError::parse(
                    "id",
                    vehicle.id().to_string(),
                    "duplicate identifier",
                ));
            }
        }

        self.vehicles = vehicles;
        self.allocator.resync(self.ids());
        Ok(())
    }

    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            kind: "Vec<Vehicle>",
            initialized_at: self.initialized_at,
            len: self.vehicles.len(),
        }
    }

    /// All vehicles in insertion (or last sorted) order
    pub fn show(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn ids(&self) -> Vec<VehicleId> {
        self.vehicles.iter().map(Vehicle::id).collect()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Validate the draft, give it a fresh id and today's date, append it.
    pub fn add(&mut self, draft: VehicleDraft) -> std::result::Result<VehicleId, ValidationError> {
        let id = self.peek_next_id()?;
        let vehicle = Vehicle::new(id, draft)?;
        self.push(vehicle)
    }

    /// Append an already valid vehicle under a fresh id and today's date
    pub fn push(&mut self, mut vehicle: Vehicle) -> std::result::Result<VehicleId, ValidationError> {
        let id = self
            .allocator
            .next_id(self.vehicles.iter().map(Vehicle::id))
            .ok_or_else(ids_exhausted)?;
        vehicle.assign_id(id);
        vehicle.stamp_creation_date(Local::now().date_naive());
        self.vehicles.push(vehicle);
        debug!("added vehicle id={}", id);
        Ok(id)
    }

    /// Replace in place, keeping id, position and creation date.
    ///
    /// Returns `Ok(false)` when no vehicle has this id.
    pub fn update_by_id(
        &mut self,
        id: VehicleId,
        draft: VehicleDraft,
    ) -> std::result::Result<bool, ValidationError> {
        let Some(slot) = self.vehicles.iter_mut().find(|v| v.id() == id) else {
            return Ok(false);
        };

        let updated = Vehicle::restore(id, slot.creation_date(), draft)?;
        *slot = updated;
        debug!("updated vehicle id={}", id);
        Ok(true)
    }

    pub fn remove_by_id(&mut self, id: VehicleId) -> bool {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| v.id() != id);
        before != self.vehicles.len()
    }

    /// Remove the tail. `None` means the collection was empty.
    pub fn remove_last(&mut self) -> Option<Vehicle> {
        self.vehicles.pop()
    }

    /// Empties the collection. The allocator is not reset.
    pub fn clear(&mut self) {
        self.vehicles.clear();
    }

    /// Remove every vehicle ordering strictly before `reference`; returns the count
    pub fn remove_lower<R: NaturalKey + ?Sized>(&mut self, reference: &R) -> usize {
        let before = self.vehicles.len();
        self.vehicles
            .retain(|v| v.natural_cmp(reference) != std::cmp::Ordering::Less);
        let removed = before - self.vehicles.len();
        debug!("remove_lower('{}') removed {}", reference.natural_key(), removed);
        removed
    }

    /// Stable in-place sort by natural order
    pub fn sort(&mut self) {
        self.vehicles.sort_by(|a, b| a.natural_cmp(b));
    }

    pub fn sum_of_capacity(&self) -> f64 {
        self.vehicles.iter().map(Vehicle::capacity).sum()
    }

    pub fn filter_by_capacity(&self, capacity: f64) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| (v.capacity() - capacity).abs() < CAPACITY_TOLERANCE)
            .collect()
    }

    pub fn filter_less_than_type(&self, vehicle_type: VehicleType) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.vehicle_type() < vehicle_type)
            .collect()
    }

    pub fn contains_id(&self, id: VehicleId) -> bool {
        self.vehicles.iter().any(|v| v.id() == id)
    }

    fn peek_next_id(&self) -> std::result::Result<VehicleId, ValidationError> {
        self.vehicles
            .iter()
            .map(Vehicle::id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(ids_exhausted)
    }
}

fn ids_exhausted() -> ValidationError {
    ValidationError::new("id", format!("no identifier left above {}", VehicleId::MAX))
}

impl Default for VehicleCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a VehicleCollection {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
