//! File and image media sources.
//!
//! Both read a single URI from their source field. Images use that URI as
//! their thumbnail; plain files fall back to the generic icon.

use crate::error::ConfigError;
use crate::host::{FieldIntrospection, SourceContext};
use crate::media::{BundleId, FieldType, Media, SourceConfiguration, SourceField};

use super::{
    MediaSource, MetadataAttribute, MetadataValue, PluginDefinition, DEFAULT_NAME, THUMBNAIL_URI,
};

/// Plugin id of the file source.
pub const FILE_PLUGIN_ID: &str = "file";

/// Plugin id of the image source.
pub const IMAGE_PLUGIN_ID: &str = "image";

/// Metadata name of the stored file URI.
pub const URI: &str = "uri";

static FILE_DEFINITION: PluginDefinition = PluginDefinition {
    id: FILE_PLUGIN_ID,
    label: "File",
    description: "Use local files for reusable media.",
    default_thumbnail_filename: "generic.png",
    allowed_field_types: &[FieldType::File, FieldType::Image],
};

static IMAGE_DEFINITION: PluginDefinition = PluginDefinition {
    id: IMAGE_PLUGIN_ID,
    label: "Image",
    description: "Use local images for reusable media.",
    default_thumbnail_filename: "no-thumbnail.png",
    allowed_field_types: &[FieldType::Image],
};

/// Source for media backed by a single stored file.
#[derive(Debug, Clone)]
pub struct FileSource {
    definition: &'static PluginDefinition,
    source_field: SourceField,
}

impl FileSource {
    pub fn file(configuration: &SourceConfiguration) -> Result<Self, ConfigError> {
        Ok(Self {
            definition: &FILE_DEFINITION,
            source_field: SourceField::from_configuration(configuration)?,
        })
    }

    pub fn image(configuration: &SourceConfiguration) -> Result<Self, ConfigError> {
        Ok(Self {
            definition: &IMAGE_DEFINITION,
            source_field: SourceField::from_configuration(configuration)?,
        })
    }

    pub fn source_field(&self) -> &SourceField {
        &self.source_field
    }

    fn is_image(&self) -> bool {
        self.definition.id == IMAGE_PLUGIN_ID
    }

    fn uri<'m>(&self, media: &'m Media) -> Option<&'m str> {
        media
            .uri(self.source_field.name())
            .filter(|uri| !uri.is_empty())
    }
}

impl MediaSource for FileSource {
    fn plugin_definition(&self) -> &PluginDefinition {
        self.definition
    }

    fn metadata_attributes(&self) -> Vec<MetadataAttribute> {
        vec![MetadataAttribute {
            name: URI,
            label: "File URI",
        }]
    }

    fn metadata(&self, media: &Media, name: &str, cx: &SourceContext<'_>) -> Option<MetadataValue> {
        let value = match name {
            URI => self.uri(media).map(str::to_string),
            THUMBNAIL_URI if self.is_image() => self.uri(media).map(str::to_string),
            DEFAULT_NAME => self
                .uri(media)
                .and_then(|uri| uri.rsplit('/').next())
                .filter(|file_name| !file_name.is_empty())
                .map(str::to_string),
            _ => None,
        };

        match value {
            Some(text) => Some(MetadataValue::Text(text)),
            None if name == URI => None,
            None => cx.fallback.fallback_metadata(self.definition, media, name),
        }
    }

    fn check_configuration(
        &self,
        bundle: &BundleId,
        fields: &dyn FieldIntrospection,
    ) -> Result<(), ConfigError> {
        let definitions = fields.field_definitions(bundle);
        self.source_field
            .check(bundle, &definitions, self.definition.allowed_field_types)
            .map(|_| ())
    }
}
