use thiserror::Error;

use crate::media::{BundleId, MediaId};

/// Errors raised when a media entity fails source validation.
///
/// Validation stops at the first failing check, so a single call never
/// reports more than one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The slides field holds no references
    #[error("At least one slideshow item must exist.")]
    Empty { field: String },

    /// A referenced slide belongs to a bundle outside the field's allow-list
    #[error("Slideshow item of incorrect media bundle detected.")]
    IncorrectBundle {
        field: String,
        item: MediaId,
        bundle: BundleId,
    },
}

impl ValidationError {
    /// Name of the field the violation is attached to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Empty { field } => field,
            ValidationError::IncorrectBundle { field, .. } => field,
        }
    }

    /// Human-readable message shown next to the offending field.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors in how a media type or the tool itself is configured
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A source was built from a configuration without a source field
    #[error("No source field selected")]
    NoSourceField,

    /// The media type has not selected its source field yet
    #[error("Media type '{bundle}' has no source field configured")]
    MissingSourceField { bundle: BundleId },

    /// The configured source field is not defined on the bundle
    #[error("Source field '{field}' does not exist on bundle '{bundle}'")]
    UnknownField { field: String, bundle: BundleId },

    /// The configured source field cannot hold slide references
    #[error("Source field '{field}' is not usable: {reason}")]
    InvalidField { field: String, reason: String },

    /// No source implementation is known for the plugin id
    #[error("Unknown media source plugin '{plugin}' for bundle '{bundle}'")]
    UnknownSource { plugin: String, bundle: BundleId },

    /// Command-line or environment settings are invalid
    #[error("Invalid settings: {0}")]
    Settings(String),
}

/// Errors loading a media library file
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid library document
    #[error("Invalid library document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same media id
    #[error("Duplicate media id: {0}")]
    DuplicateMedia(MediaId),
}
