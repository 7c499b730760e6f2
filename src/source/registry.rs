//! Source registry mapping bundles to their media sources.
//!
//! # Example
//!
//! ```ignore
//! use media_slideshow::host::MemoryStore;
//! use media_slideshow::source::{SourceRegistry, DEFAULT_MAX_DEPTH};
//!
//! let store = MemoryStore::from_path("library.json")?;
//! let registry = SourceRegistry::from_media_types(store.media_types(), DEFAULT_MAX_DEPTH)?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::host::MediaTypeRegistry;
use crate::media::{BundleId, MediaType};

use super::file::{FileSource, FILE_PLUGIN_ID, IMAGE_PLUGIN_ID};
use super::slideshow::{SlideshowSource, SLIDESHOW_PLUGIN_ID};
use super::MediaSource;

/// Instantiate the source named by a bundle definition.
///
/// A bundle without a selected source field yields
/// [`ConfigError::MissingSourceField`] naming the bundle.
///
/// # Arguments
/// * `media_type` - Bundle definition naming the plugin and its configuration
/// * `max_depth` - Thumbnail delegation limit for slideshow sources
pub fn build_source(
    media_type: &MediaType,
    max_depth: usize,
) -> Result<Arc<dyn MediaSource>, ConfigError> {
    let configuration = &media_type.source_configuration;
    let source = match media_type.source.as_str() {
        SLIDESHOW_PLUGIN_ID => SlideshowSource::new(configuration)
            .map(|source| shared(source.with_max_depth(max_depth))),
        FILE_PLUGIN_ID => FileSource::file(configuration).map(shared),
        IMAGE_PLUGIN_ID => FileSource::image(configuration).map(shared),
        other => {
            return Err(ConfigError::UnknownSource {
                plugin: other.to_string(),
                bundle: media_type.id.clone(),
            })
        }
    };

    source.map_err(|err| match err {
        ConfigError::NoSourceField => ConfigError::MissingSourceField {
            bundle: media_type.id.clone(),
        },
        other => other,
    })
}

fn shared<S: MediaSource + 'static>(source: S) -> Arc<dyn MediaSource> {
    Arc::new(source)
}

/// Registry of the source governing each bundle.
#[derive(Default)]
pub struct SourceRegistry {
    sources: BTreeMap<BundleId, Arc<dyn MediaSource>>,

    /// Bundles left out because no source field is selected yet
    unconfigured: Vec<BundleId>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build sources for every bundle definition.
    ///
    /// Bundles that have not selected a source field yet are skipped and
    /// listed by [`SourceRegistry::unconfigured`]; media of those bundles
    /// have no source. Fails on the first bundle whose plugin is unknown or
    /// whose configuration is otherwise invalid.
    pub fn from_media_types<'a>(
        media_types: impl IntoIterator<Item = &'a MediaType>,
        max_depth: usize,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for media_type in media_types {
            match build_source(media_type, max_depth) {
                Ok(source) => {
                    debug!(
                        bundle = %media_type.id,
                        plugin = %media_type.source,
                        "registered media source"
                    );
                    registry.register(media_type.id.clone(), source);
                }
                Err(ConfigError::MissingSourceField { bundle }) => {
                    warn!(
                        bundle = %bundle,
                        plugin = %media_type.source,
                        "no source field selected, bundle left unregistered"
                    );
                    registry.unconfigured.push(bundle);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(registry)
    }

    /// Register `source` for `bundle`, returning the source it replaces.
    pub fn register(
        &mut self,
        bundle: BundleId,
        source: Arc<dyn MediaSource>,
    ) -> Option<Arc<dyn MediaSource>> {
        self.sources.insert(bundle, source)
    }

    pub fn get(&self, bundle: &BundleId) -> Option<&Arc<dyn MediaSource>> {
        self.sources.get(bundle)
    }

    /// Registered bundles with their sources, ordered by bundle id.
    pub fn iter(&self) -> impl Iterator<Item = (&BundleId, &Arc<dyn MediaSource>)> {
        self.sources.iter()
    }

    /// Bundles skipped by [`SourceRegistry::from_media_types`].
    pub fn unconfigured(&self) -> &[BundleId] {
        &self.unconfigured
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl MediaTypeRegistry for SourceRegistry {
    fn source_for_bundle(&self, bundle: &BundleId) -> Option<Arc<dyn MediaSource>> {
        self.sources.get(bundle).cloned()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.sources
                    .iter()
                    .map(|(bundle, source)| (bundle.as_str(), source.plugin_definition().id)),
            )
            .finish()
    }
}
