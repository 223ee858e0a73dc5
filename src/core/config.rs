use std::path::{Path, PathBuf};

/// Registry configuration
///
/// Built the same way as a connection config: start from a data file and
/// chain setters.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// File the collection is loaded from and saved to
    pub data_file: PathBuf,

    /// Create missing parent directories when saving
    pub create_parent_dirs: bool,
}

impl RegistryConfig {
    pub fn new(data_file: impl AsRef<Path>) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
            create_parent_dirs: true,
        }
    }

    pub fn create_parent_dirs(mut self, enabled: bool) -> Self {
        self.create_parent_dirs = enabled;
        self
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}
