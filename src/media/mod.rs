//! Media entity model.
//!
//! These types mirror the records a host media subsystem keeps: media
//! entities, their bundles (media types) and the field definitions attached
//! to each bundle. The crate only ever reads them.
//!
//! # Fields
//!
//! Fields are dynamically typed. A media entity carries a map from field
//! name to [`FieldValue`], and the slideshow source reads its slide list
//! through [`Media::references`] using the field name from the bundle's
//! [`SourceConfiguration`].

mod field;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use field::{FieldDefinition, FieldType, HandlerSettings, SourceField, MEDIA_ENTITY_TYPE};

// =============================================================================
// Identifiers
// =============================================================================

/// Numeric identifier of a media entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub u64);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machine name of a bundle (media type).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(String);

impl BundleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BundleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BundleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Media Entity
// =============================================================================

/// Value stored in a single field of a media entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Ordered references to other media entities
    References(Vec<MediaId>),

    /// A file or resource URI
    Uri(String),

    /// Plain text
    Text(String),
}

/// A media entity as loaded from host storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,

    pub bundle: BundleId,

    /// Creation time, stored as unix seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Media {
    /// Create a media entity with no fields.
    pub fn new(id: MediaId, bundle: impl Into<BundleId>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            bundle: bundle.into(),
            created,
            name: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a field value, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Ordered reference ids held by `name`.
    ///
    /// Returns `None` when the field is absent or holds a non-reference value.
    pub fn references(&self, name: &str) -> Option<&[MediaId]> {
        match self.fields.get(name)? {
            FieldValue::References(ids) => Some(ids),
            _ => None,
        }
    }

    /// URI held by `name`, if the field is a URI field.
    pub fn uri(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            FieldValue::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

// =============================================================================
// Media Type
// =============================================================================

/// Per-bundle configuration of its media source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfiguration {
    /// Field holding the source data (slide references for slideshows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
}

impl SourceConfiguration {
    pub fn with_source_field(field: impl Into<String>) -> Self {
        Self {
            source_field: Some(field.into()),
        }
    }
}

/// A bundle definition: which source plugin governs it and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    pub id: BundleId,

    pub label: String,

    /// Plugin id of the governing source (e.g. `slideshow`)
    pub source: String,

    #[serde(default)]
    pub source_configuration: SourceConfiguration,
}
