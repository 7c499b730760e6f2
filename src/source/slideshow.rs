//! Slideshow media source.
//!
//! A slideshow is a media entity whose source field holds an ordered list of
//! references to other media entities (the slides). The source computes:
//!
//! - `length`: number of slides
//! - `default_name`: "3 slides, created on 2024-01-01T10:00:00"
//! - `thumbnail_uri`: the thumbnail of the first slide, as resolved by the
//!   source of that slide's bundle
//!
//! and rejects slideshows without slides or with slides from bundles the
//! source field does not allow.

use tracing::{debug, warn};

use crate::error::{ConfigError, ValidationError};
use crate::host::{FieldIntrospection, SourceContext, STORAGE_DATETIME_FORMAT};
use crate::media::{
    BundleId, FieldDefinition, FieldType, Media, MediaId, SourceConfiguration, SourceField,
    MEDIA_ENTITY_TYPE,
};

use super::settings::{source_field_select, SelectField};
use super::{
    EntityConstraint, MediaSource, MetadataAttribute, MetadataValue, PluginDefinition,
    DEFAULT_NAME, THUMBNAIL_URI,
};

/// Plugin id of the slideshow source.
pub const SLIDESHOW_PLUGIN_ID: &str = "slideshow";

/// Metadata name of the slide count.
pub const LENGTH: &str = "length";

/// Default limit on nested thumbnail delegations.
pub const DEFAULT_MAX_DEPTH: usize = 4;

static DEFINITION: PluginDefinition = PluginDefinition {
    id: SLIDESHOW_PLUGIN_ID,
    label: "Slideshow",
    description: "Provides business logic and metadata for slideshows.",
    default_thumbnail_filename: "slideshow.png",
    allowed_field_types: &[FieldType::EntityReference],
};

const SETTINGS_DESCRIPTION: &str = "Field on media entity that stores slideshow items.";

/// Media source for slideshows.
#[derive(Debug, Clone)]
pub struct SlideshowSource {
    source_field: SourceField,

    /// Delegation depth at which thumbnails stop being resolved through slides
    max_depth: usize,
}

impl SlideshowSource {
    /// Create a source reading slides from the configured source field.
    pub fn new(configuration: &SourceConfiguration) -> Result<Self, ConfigError> {
        Ok(Self {
            source_field: SourceField::from_configuration(configuration)?,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn definition() -> &'static PluginDefinition {
        &DEFINITION
    }

    pub fn source_field(&self) -> &SourceField {
        &self.source_field
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Slide references of `media`, in playback order.
    pub fn slides<'m>(&self, media: &'m Media) -> &'m [MediaId] {
        media.references(self.source_field.name()).unwrap_or(&[])
    }

    /// Number of slides in `media`.
    pub fn length(&self, media: &Media) -> usize {
        self.slides(media).len()
    }

    /// Constraint requiring at least one slide.
    pub fn items_count(&self) -> EntityConstraint {
        EntityConstraint::ItemsCount {
            source_field_name: self.source_field.name().to_string(),
        }
    }

    /// Settings form for `bundle`, with this source's field pre-selected.
    pub fn settings_form(&self, bundle: &BundleId, fields: &dyn FieldIntrospection) -> SelectField {
        Self::settings_form_for(bundle, Some(self.source_field.name()), fields)
    }

    /// Settings form for a bundle whose source field may not be chosen yet.
    ///
    /// Offers every non-base entity reference field targeting media.
    pub fn settings_form_for(
        bundle: &BundleId,
        current: Option<&str>,
        fields: &dyn FieldIntrospection,
    ) -> SelectField {
        let definitions = fields.field_definitions(bundle);
        source_field_select(
            &definitions,
            current,
            SETTINGS_DESCRIPTION,
            FieldDefinition::is_media_reference,
        )
    }

    fn fallback(&self, media: &Media, name: &str, cx: &SourceContext<'_>) -> Option<MetadataValue> {
        cx.fallback.fallback_metadata(&DEFINITION, media, name)
    }

    fn default_name(&self, media: &Media, cx: &SourceContext<'_>) -> Option<MetadataValue> {
        let length = self.length(media);
        if length == 0 {
            return self.fallback(media, DEFAULT_NAME, cx);
        }

        let date = cx.dates.format(media.created, STORAGE_DATETIME_FORMAT);
        let name = if length == 1 {
            format!("1 slide, created on {}", date)
        } else {
            format!("{} slides, created on {}", length, date)
        };
        Some(MetadataValue::Text(name))
    }

    /// Thumbnail of the first slide, asked of the source of its bundle.
    fn first_slide_thumbnail(&self, media: &Media, cx: &SourceContext<'_>) -> Option<String> {
        if cx.depth() >= self.max_depth {
            warn!(
                media = %media.id,
                depth = cx.depth(),
                "slideshow thumbnail delegation too deep, using default icon"
            );
            return None;
        }

        let Some(&first) = self.slides(media).first() else {
            debug!(media = %media.id, "slideshow has no slides");
            return None;
        };

        let Some(slide) = cx.entities.load_media(first) else {
            debug!(media = %media.id, slide = %first, "first slide not found");
            return None;
        };

        if cx.entities.load_media_type(&slide.bundle).is_none() {
            debug!(slide = %slide.id, bundle = %slide.bundle, "slide bundle not found");
            return None;
        }

        let Some(source) = cx.sources.source_for_bundle(&slide.bundle) else {
            debug!(slide = %slide.id, bundle = %slide.bundle, "no source for slide bundle");
            return None;
        };

        source
            .resolve_thumbnail(&slide, &cx.descend())
            .filter(|uri| !uri.is_empty())
    }
}

impl MediaSource for SlideshowSource {
    fn plugin_definition(&self) -> &PluginDefinition {
        &DEFINITION
    }

    fn metadata_attributes(&self) -> Vec<MetadataAttribute> {
        vec![MetadataAttribute {
            name: LENGTH,
            label: "Slideshow length",
        }]
    }

    fn metadata(&self, media: &Media, name: &str, cx: &SourceContext<'_>) -> Option<MetadataValue> {
        match name {
            LENGTH => Some(MetadataValue::Count(self.length(media))),
            DEFAULT_NAME => self.default_name(media, cx),
            THUMBNAIL_URI => match self.first_slide_thumbnail(media, cx) {
                Some(uri) => Some(MetadataValue::Text(uri)),
                None => self.fallback(media, THUMBNAIL_URI, cx),
            },
            _ => self.fallback(media, name, cx),
        }
    }

    fn entity_constraints(&self) -> Vec<EntityConstraint> {
        vec![self.items_count()]
    }

    /// Reject empty slideshows, then slides of disallowed bundles.
    ///
    /// Stops at the first failure. Slides that cannot be loaded are not
    /// checked against the allow-list. The slide count is checked here as
    /// well as through [`MediaSource::entity_constraints`], since hosts may
    /// call either one alone.
    fn validate(&self, media: &Media, cx: &SourceContext<'_>) -> Result<(), ValidationError> {
        self.items_count().check(media)?;

        let definitions = cx.fields.field_definitions(&media.bundle);
        let Some(settings) = self
            .source_field
            .definition(&definitions)
            .map(|def| &def.handler_settings)
        else {
            return Ok(());
        };
        if settings.target_bundles.is_none() {
            return Ok(());
        }

        for &id in self.slides(media) {
            let Some(slide) = cx.entities.load_media(id) else {
                debug!(
                    media = %media.id,
                    slide = %id,
                    "referenced slide not found, skipping bundle check"
                );
                continue;
            };

            if !settings.allows(&slide.bundle) {
                return Err(ValidationError::IncorrectBundle {
                    field: self.source_field.name().to_string(),
                    item: slide.id,
                    bundle: slide.bundle,
                });
            }
        }

        Ok(())
    }

    fn check_configuration(
        &self,
        bundle: &BundleId,
        fields: &dyn FieldIntrospection,
    ) -> Result<(), ConfigError> {
        let definitions = fields.field_definitions(bundle);
        let def = self
            .source_field
            .check(bundle, &definitions, DEFINITION.allowed_field_types)?;

        if def.base_field {
            return Err(ConfigError::InvalidField {
                field: def.name.clone(),
                reason: "base fields cannot hold slides".to_string(),
            });
        }

        if def.target_type.as_deref() != Some(MEDIA_ENTITY_TYPE) {
            return Err(ConfigError::InvalidField {
                field: def.name.clone(),
                reason: format!(
                    "references '{}' entities instead of media",
                    def.target_type.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(())
    }
}
