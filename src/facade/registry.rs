use std::path::Path;

use log::{info, warn};

use crate::core::{RegistryConfig, Result, ValidationError};
use crate::model::{NaturalKey, Vehicle, VehicleDraft, VehicleId, VehicleType};
use crate::storage::{CollectionInfo, FileManager, VehicleCollection};

/// The collection bound to its data file.
///
/// This is the surface the command layer talks to.
pub struct VehicleRegistry {
    collection: VehicleCollection,
    files: FileManager,
    load_warning: Option<String>,
}

impl VehicleRegistry {
    /// Load the data file, or start empty if it cannot be loaded.
    ///
    /// The reason for falling back is kept in [`VehicleRegistry::load_warning`].
    pub fn open(config: RegistryConfig) -> Self {
        let files = FileManager::from_config(&config);
        let (collection, load_warning) =
            match files.load().and_then(VehicleCollection::from_loaded) {
                Ok(collection) => (collection, None),
                Err(err) => {
                    warn!(
                        "failed to load '{}', starting with an empty collection: {}",
                        files.path().display(),
                        err
                    );
                    (VehicleCollection::new(), Some(err.to_string()))
                }
            };

        Self {
            collection,
            files,
            load_warning,
        }
    }

    pub fn open_path<P: AsRef<Path>>(path: P) -> Self {
        Self::open(RegistryConfig::new(path))
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn path(&self) -> &Path {
        self.files.path()
    }

    pub fn collection(&self) -> &VehicleCollection {
        &self.collection
    }

    /// Re-read the data file. The current collection is kept on failure.
    pub fn reload(&mut self) -> Result<usize> {
        let vehicles = self.files.load()?;
        self.collection.replace_all(vehicles)?;
        self.load_warning = None;
        Ok(self.collection.len())
    }

    pub fn save(&self) -> Result<()> {
        self.files.save(self.collection.show())
    }

    pub fn info(&self) -> CollectionInfo {
        self.collection.info()
    }

    pub fn show(&self) -> &[Vehicle] {
        self.collection.show()
    }

    pub fn add(&mut self, draft: VehicleDraft) -> std::result::Result<VehicleId, ValidationError> {
        let id = self.collection.add(draft)?;
        info!("vehicle {} added", id);
        Ok(id)
    }

    pub fn update(
        &mut self,
        id: VehicleId,
        draft: VehicleDraft,
    ) -> std::result::Result<bool, ValidationError> {
        self.collection.update_by_id(id, draft)
    }

    pub fn remove_by_id(&mut self, id: VehicleId) -> bool {
        self.collection.remove_by_id(id)
    }

    pub fn clear(&mut self) {
        self.collection.clear();
    }

    pub fn remove_last(&mut self) -> Option<Vehicle> {
        self.collection.remove_last()
    }

    pub fn remove_lower<R: NaturalKey + ?Sized>(&mut self, reference: &R) -> usize {
        self.collection.remove_lower(reference)
    }

    pub fn sort(&mut self) {
        self.collection.sort();
    }

    pub fn sum_of_capacity(&self) -> f64 {
        self.collection.sum_of_capacity()
    }

    pub fn filter_by_capacity(&self, capacity: f64) -> Vec<&Vehicle> {
        self.collection.filter_by_capacity(capacity)
    }

    pub fn filter_less_than_type(&self, vehicle_type: VehicleType) -> Vec<&Vehicle> {
        self.collection.filter_less_than_type(vehicle_type)
    }

    pub fn contains_id(&self, id: VehicleId) -> bool {
        self.collection.contains_id(id)
    }
}
