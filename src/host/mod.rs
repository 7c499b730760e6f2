//! Host framework collaborators.
//!
//! Media sources never own storage, field definitions or date handling.
//! They reach the host through the traits in this module, handed to every
//! call in a [`SourceContext`]:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     MediaSource (slideshow, file, …)     │
//! └────────────────────┬────────────────────┘
//!                      │ SourceContext
//!     ┌────────────┬───┴────────┬────────────┬──────────────┐
//!     ▼            ▼            ▼            ▼              ▼
//! EntityLookup  FieldIntro-  MediaType-  DateFormatter  FallbackResolver
//!               spection     Registry
//! ```
//!
//! [`MemoryStore`] implements the storage-side traits for tests and the
//! command-line tool.

mod date;
mod fallback;
mod memory;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::media::{BundleId, FieldDefinition, Media, MediaId, MediaType};
use crate::source::{MediaSource, MetadataValue, PluginDefinition};

pub use date::{ChronoDateFormatter, STORAGE_DATETIME_FORMAT};
pub use fallback::{DefaultMetadata, DEFAULT_ICON_BASE};
pub use memory::{Library, MemoryStore};

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Read access to stored entities.
pub trait EntityLookup: Send + Sync {
    /// Load a media entity by id.
    fn load_media(&self, id: MediaId) -> Option<Media>;

    /// Load a bundle definition by id.
    fn load_media_type(&self, bundle: &BundleId) -> Option<MediaType>;
}

/// Maps bundles to the source implementation governing them.
pub trait MediaTypeRegistry: Send + Sync {
    fn source_for_bundle(&self, bundle: &BundleId) -> Option<Arc<dyn MediaSource>>;
}

/// Renders timestamps for display.
pub trait DateFormatter: Send + Sync {
    /// Format `timestamp` with a strftime-style `pattern`.
    fn format(&self, timestamp: DateTime<Utc>, pattern: &str) -> String;
}

/// Enumerates the fields attached to a bundle.
pub trait FieldIntrospection: Send + Sync {
    /// Field definitions of `bundle`, in definition order.
    fn field_definitions(&self, bundle: &BundleId) -> Vec<FieldDefinition>;
}

/// Generic metadata used when a source has no specific answer.
pub trait FallbackResolver: Send + Sync {
    fn fallback_metadata(
        &self,
        plugin: &PluginDefinition,
        media: &Media,
        name: &str,
    ) -> Option<MetadataValue>;
}

// =============================================================================
// SourceContext
// =============================================================================

/// Collaborators available to a source for the duration of one call.
///
/// Also tracks how many thumbnail delegations led to the current call so
/// chains of slideshows can be cut off.
#[derive(Clone, Copy)]
pub struct SourceContext<'a> {
    pub entities: &'a dyn EntityLookup,
    pub fields: &'a dyn FieldIntrospection,
    pub sources: &'a dyn MediaTypeRegistry,
    pub dates: &'a dyn DateFormatter,
    pub fallback: &'a dyn FallbackResolver,
    depth: usize,
}

impl<'a> SourceContext<'a> {
    pub fn new(
        entities: &'a dyn EntityLookup,
        fields: &'a dyn FieldIntrospection,
        sources: &'a dyn MediaTypeRegistry,
        dates: &'a dyn DateFormatter,
        fallback: &'a dyn FallbackResolver,
    ) -> Self {
        Self {
            entities,
            fields,
            sources,
            dates,
            fallback,
            depth: 0,
        }
    }

    /// Number of delegations that led to this context.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for a call delegated one level further.
    pub fn descend(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }
}

impl std::fmt::Debug for SourceContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceContext")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
