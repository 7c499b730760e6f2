//! # Media Slideshow
//!
//! A slideshow media source for content-management media libraries.
//!
//! A slideshow is a media entity whose source field holds an ordered list of
//! references to other media entities (the slides). This crate computes the
//! slideshow's metadata, validates its slide list before the host stores it,
//! and resolves its thumbnail by delegating to the source of the first
//! slide's bundle.
//!
//! ## Architecture
//!
//! - [`media`] - Media entities, bundles and field definitions
//! - [`host`] - Traits for the host framework's storage, field and date
//!   services, plus an in-memory implementation
//! - [`source`] - The [`MediaSource`] trait, the slideshow and file sources
//!   and the bundle registry
//! - [`config`] - CLI configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use media_slideshow::{
//!     ChronoDateFormatter, DefaultMetadata, MemoryStore, SourceContext, SourceRegistry,
//!     DEFAULT_MAX_DEPTH,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::from_path("library.json")?;
//!     let registry = SourceRegistry::from_media_types(store.media_types(), DEFAULT_MAX_DEPTH)?;
//!     let dates = ChronoDateFormatter::utc();
//!     let fallback = DefaultMetadata::default();
//!     let cx = SourceContext::new(&store, &store, &registry, &dates, &fallback);
//!
//!     for media in store.all_media() {
//!         media_slideshow::validate_media(&media, &cx)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod media;
pub mod source;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, Command, GlobalOptions, MetadataConfig, SettingsConfig};
pub use error::{ConfigError, StorageError, ValidationError};
pub use host::{
    ChronoDateFormatter, DateFormatter, DefaultMetadata, EntityLookup, FallbackResolver,
    FieldIntrospection, Library, MediaTypeRegistry, MemoryStore, SourceContext,
    DEFAULT_ICON_BASE, STORAGE_DATETIME_FORMAT,
};
pub use media::{
    BundleId, FieldDefinition, FieldType, FieldValue, HandlerSettings, Media, MediaId, MediaType,
    SourceConfiguration, SourceField,
};
pub use source::{
    build_source, validate_media, EntityConstraint, FileSource, MediaSource, MetadataAttribute,
    MetadataValue, PluginDefinition, SelectField, SelectOption, SlideshowSource, SourceRegistry,
    DEFAULT_MAX_DEPTH, DEFAULT_NAME, LENGTH, SLIDESHOW_PLUGIN_ID, THUMBNAIL_URI,
};
