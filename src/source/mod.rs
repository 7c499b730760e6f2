//! Media sources.
//!
//! A media source governs one or more bundles: it declares which metadata
//! it can compute, computes it for an entity, and validates entities before
//! the host stores them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            SourceRegistry               │
//! │      (bundle id → MediaSource)          │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           MediaSource Trait             │
//! └────────────────────┬────────────────────┘
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │ SlideshowSource │    │     FileSource      │
//! │ (slide lists)   │    │  (file / image)     │
//! └─────────────────┘    └─────────────────────┘
//! ```
//!
//! A slideshow resolves its thumbnail by looking up the source of its first
//! slide's bundle in the registry and asking it for the slide's thumbnail.

mod constraint;
mod file;
mod registry;
mod settings;
mod slideshow;

use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, ValidationError};
use crate::host::{FieldIntrospection, SourceContext};
use crate::media::{BundleId, FieldType, Media};

pub use constraint::EntityConstraint;
pub use file::{FileSource, FILE_PLUGIN_ID, IMAGE_PLUGIN_ID, URI};
pub use registry::{build_source, SourceRegistry};
pub use settings::{source_field_select, SelectField, SelectOption};
pub use slideshow::{SlideshowSource, DEFAULT_MAX_DEPTH, LENGTH, SLIDESHOW_PLUGIN_ID};

/// Metadata name of an entity's generated label.
pub const DEFAULT_NAME: &str = "default_name";

/// Metadata name of an entity's thumbnail URI.
pub const THUMBNAIL_URI: &str = "thumbnail_uri";

// =============================================================================
// Metadata Types
// =============================================================================

/// A computed metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Count(usize),
    Text(String),
}

impl MetadataValue {
    pub fn as_count(&self) -> Option<usize> {
        match self {
            MetadataValue::Count(count) => Some(*count),
            MetadataValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Count(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Count(_) => None,
        }
    }
}

/// A metadata field a source declares it can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetadataAttribute {
    pub name: &'static str,
    pub label: &'static str,
}

/// Static description of a source plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,

    /// Icon used when no better thumbnail is available
    pub default_thumbnail_filename: &'static str,

    /// Field types the source field may have
    pub allowed_field_types: &'static [FieldType],
}

// =============================================================================
// MediaSource Trait
// =============================================================================

/// Source plugin governing the bundles it is registered for.
pub trait MediaSource: Send + Sync {
    fn plugin_definition(&self) -> &PluginDefinition;

    /// Metadata fields this source computes itself.
    fn metadata_attributes(&self) -> Vec<MetadataAttribute>;

    /// Compute the metadata value `name` for `media`.
    ///
    /// Names the source does not handle go to the context's fallback
    /// resolver. Missing data never produces an error.
    fn metadata(&self, media: &Media, name: &str, cx: &SourceContext<'_>) -> Option<MetadataValue>;

    /// Thumbnail URI of `media`, used when another source delegates to this one.
    fn resolve_thumbnail(&self, media: &Media, cx: &SourceContext<'_>) -> Option<String> {
        self.metadata(media, THUMBNAIL_URI, cx)
            .and_then(MetadataValue::into_text)
    }

    /// Declarative constraints the host enforces on entities of this source.
    fn entity_constraints(&self) -> Vec<EntityConstraint> {
        Vec::new()
    }

    /// Check `media` before it is stored.
    fn validate(&self, _media: &Media, _cx: &SourceContext<'_>) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Check the source configuration against the bundle's fields.
    fn check_configuration(
        &self,
        _bundle: &BundleId,
        _fields: &dyn FieldIntrospection,
    ) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Run the constraints and validation of the source governing `media`.
///
/// The constraint loop stands in for the host's structural checks, which
/// run on every save. [`MediaSource::validate`] must stand on its own, so a
/// source may repeat a constraint there; the slideshow source re-checks
/// `ItemsCount` and the first failure is returned either way.
///
/// Bundles without a registered source are accepted.
pub fn validate_media(media: &Media, cx: &SourceContext<'_>) -> Result<(), ValidationError> {
    let Some(source) = cx.sources.source_for_bundle(&media.bundle) else {
        debug!(bundle = %media.bundle, "no source registered, skipping validation");
        return Ok(());
    };

    for constraint in source.entity_constraints() {
        constraint.check(media)?;
    }

    source.validate(media, cx)
}
