use std::path::PathBuf;
use thiserror::Error;

/// A field value that breaks an entity-model invariant.
///
/// Raised at the point of assignment; the entity (and any collection holding
/// it) keeps its previous state.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid value for '{field}': {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Parse error in <{field}> ('{fragment}'): {reason}")]
    Parse {
        field: &'static str,
        fragment: String,
        reason: String,
    },

    #[error("Failed to parse vehicle #{index}: {source}")]
    Vehicle {
        index: usize,
        #[source]
        source: Box<StoreError>,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn parse(field: &'static str, fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            field,
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Name of the offending field, looking through per-vehicle wrappers.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(err) => Some(err.field),
            Self::Parse { field, .. } => Some(field),
            Self::Vehicle { source, .. } => source.field(),
            Self::Io { .. } => None,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
