use tracing::debug;

use crate::media::Media;
use crate::source::{MetadataValue, PluginDefinition, DEFAULT_NAME, THUMBNAIL_URI};

use super::FallbackResolver;

/// Base directory of the generic media icons.
pub const DEFAULT_ICON_BASE: &str = "public://media-icons/generic";

/// Generic metadata shared by every source.
///
/// - `default_name`: `media:<bundle>:<id>`
/// - `thumbnail_uri`: the plugin's default icon under `icon_base`
/// - anything else: no value
#[derive(Debug, Clone)]
pub struct DefaultMetadata {
    icon_base: String,
}

impl DefaultMetadata {
    pub fn new(icon_base: impl Into<String>) -> Self {
        Self {
            icon_base: icon_base.into(),
        }
    }

    pub fn icon_base(&self) -> &str {
        &self.icon_base
    }

    /// URI of a plugin's default thumbnail icon.
    pub fn icon_uri(&self, plugin: &PluginDefinition) -> String {
        format!(
            "{}/{}",
            self.icon_base.trim_end_matches('/'),
            plugin.default_thumbnail_filename
        )
    }
}

impl Default for DefaultMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE)
    }
}

impl FallbackResolver for DefaultMetadata {
    fn fallback_metadata(
        &self,
        plugin: &PluginDefinition,
        media: &Media,
        name: &str,
    ) -> Option<MetadataValue> {
        debug!(plugin = plugin.id, media = %media.id, name, "using fallback metadata");
        match name {
            DEFAULT_NAME => Some(MetadataValue::Text(format!(
                "media:{}:{}",
                media.bundle, media.id
            ))),
            THUMBNAIL_URI => Some(MetadataValue::Text(self.icon_uri(plugin))),
            _ => None,
        }
    }
}
