//! In-memory host storage.
//!
//! [`MemoryStore`] keeps bundles, field definitions and media entities in
//! memory and implements [`EntityLookup`] and [`FieldIntrospection`] over
//! them. It can be loaded from a JSON library document:
//!
//! ```json
//! {
//!   "media_types": [
//!     { "id": "slideshow_bundle", "label": "Slideshow", "source": "slideshow",
//!       "source_configuration": { "source_field": "field_slides" } }
//!   ],
//!   "fields": {
//!     "slideshow_bundle": [
//!       { "name": "field_slides", "label": "Slides", "field_type": "entity_reference",
//!         "target_type": "media",
//!         "handler_settings": { "target_bundles": ["image_bundle"] } }
//!     ]
//!   },
//!   "media": [
//!     { "id": 1, "bundle": "slideshow_bundle", "created": 1704103200,
//!       "fields": { "field_slides": { "references": [2, 3] } } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StorageError, ValidationError};
use crate::media::{BundleId, FieldDefinition, Media, MediaId, MediaType};
use crate::source::validate_media;

use super::{EntityLookup, FieldIntrospection, SourceContext};

/// Serialized form of a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub media_types: Vec<MediaType>,

    #[serde(default)]
    pub fields: BTreeMap<BundleId, Vec<FieldDefinition>>,

    #[serde(default)]
    pub media: Vec<Media>,
}

/// Media storage held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    media_types: BTreeMap<BundleId, MediaType>,
    fields: BTreeMap<BundleId, Vec<FieldDefinition>>,
    media: RwLock<BTreeMap<MediaId, Media>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a library document.
    ///
    /// Fails if two media records share an id.
    pub fn from_library(library: Library) -> Result<Self, StorageError> {
        let mut media = BTreeMap::new();
        for item in library.media {
            let id = item.id;
            if media.insert(id, item).is_some() {
                return Err(StorageError::DuplicateMedia(id));
            }
        }

        let media_types = library
            .media_types
            .into_iter()
            .map(|media_type| (media_type.id.clone(), media_type))
            .collect();

        Ok(Self {
            media_types,
            fields: library.fields,
            media: RwLock::new(media),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let library: Library = serde_json::from_str(json)?;
        Self::from_library(library)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Register or replace a bundle definition.
    pub fn add_media_type(&mut self, media_type: MediaType) {
        self.media_types.insert(media_type.id.clone(), media_type);
    }

    /// Set the field definitions attached to `bundle`.
    pub fn set_fields(&mut self, bundle: BundleId, fields: Vec<FieldDefinition>) {
        self.fields.insert(bundle, fields);
    }

    /// Store a media entity without validating it.
    pub fn insert(&self, media: Media) {
        self.media.write().insert(media.id, media);
    }

    /// Validate a media entity with its bundle's source and store it.
    ///
    /// Nothing is written when validation fails.
    pub fn save(&self, media: Media, cx: &SourceContext<'_>) -> Result<(), ValidationError> {
        validate_media(&media, cx)?;
        debug!(media = %media.id, bundle = %media.bundle, "saving media");
        self.insert(media);
        Ok(())
    }

    /// Remove a media entity, returning it if it existed.
    pub fn delete(&self, id: MediaId) -> Option<Media> {
        self.media.write().remove(&id)
    }

    pub fn media_types(&self) -> impl Iterator<Item = &MediaType> {
        self.media_types.values()
    }

    /// Snapshot of every stored media entity, ordered by id.
    pub fn all_media(&self) -> Vec<Media> {
        self.media.read().values().cloned().collect()
    }

    pub fn media_count(&self) -> usize {
        self.media.read().len()
    }
}

impl EntityLookup for MemoryStore {
    fn load_media(&self, id: MediaId) -> Option<Media> {
        self.media.read().get(&id).cloned()
    }

    fn load_media_type(&self, bundle: &BundleId) -> Option<MediaType> {
        self.media_types.get(bundle).cloned()
    }
}

impl FieldIntrospection for MemoryStore {
    fn field_definitions(&self, bundle: &BundleId) -> Vec<FieldDefinition> {
        self.fields.get(bundle).cloned().unwrap_or_default()
    }
}
