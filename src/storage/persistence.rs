//! File side of the persistence layer: whole-file reads and atomic writes

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::codec;
use crate::core::{RegistryConfig, Result, StoreError};
use crate::model::Vehicle;

pub struct FileManager {
    path: PathBuf,
    create_parent_dirs: bool,
}

impl FileManager {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_parent_dirs: true,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            path: config.data_file.clone(),
            create_parent_dirs: config.create_parent_dirs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the whole file
    pub fn load(&self) -> Result<Vec<Vehicle>> {
        let xml = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let vehicles = codec::parse_document(&xml)?;
        info!("loaded {} vehicles from '{}'", vehicles.len(), self.path.display());
        Ok(vehicles)
    }

    /// Render the document in memory, write it to a temp file next to the
    /// target and rename it over the target.
    ///
    /// The previous file stays intact if any step fails.
    pub fn save(&self, vehicles: &[Vehicle]) -> Result<()> {
        let document = codec::to_document(vehicles);
        let dir = self.target_dir();

        if self.create_parent_dirs {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        temp.write_all(document.as_bytes())
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.flush().map_err(|e| StoreError::io(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        info!("saved {} vehicles to '{}'", vehicles.len(), self.path.display());
        Ok(())
    }

    fn target_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
