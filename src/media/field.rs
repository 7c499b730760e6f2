//! Field definitions and the configured source field.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::media::{BundleId, SourceConfiguration};

/// Entity type id that slide references must target.
pub const MEDIA_ENTITY_TYPE: &str = "media";

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    EntityReference,
    Image,
    File,
    String,
    #[serde(other)]
    Other,
}

impl FieldType {
    pub const fn name(&self) -> &'static str {
        match self {
            FieldType::EntityReference => "entity_reference",
            FieldType::Image => "image",
            FieldType::File => "file",
            FieldType::String => "string",
            FieldType::Other => "other",
        }
    }
}

/// Settings of the selection handler attached to a reference field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSettings {
    /// Bundles a reference may point at. `None` accepts every bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_bundles: Option<Vec<BundleId>>,
}

impl HandlerSettings {
    /// Whether a referenced entity of `bundle` satisfies the allow-list.
    pub fn allows(&self, bundle: &BundleId) -> bool {
        match &self.target_bundles {
            Some(allowed) => allowed.contains(bundle),
            None => true,
        }
    }
}

/// Definition of one field attached to a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,

    pub label: String,

    pub field_type: FieldType,

    /// Built-in fields every media entity has (name, created, ...)
    #[serde(default)]
    pub base_field: bool,

    /// Entity type referenced by an entity reference field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,

    #[serde(default)]
    pub handler_settings: HandlerSettings,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            base_field: false,
            target_type: None,
            handler_settings: HandlerSettings::default(),
        }
    }

    /// A configurable reference field targeting media entities.
    pub fn media_reference(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::EntityReference).with_target_type(MEDIA_ENTITY_TYPE)
    }

    pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    pub fn with_target_bundles(mut self, bundles: impl IntoIterator<Item = BundleId>) -> Self {
        self.handler_settings.target_bundles = Some(bundles.into_iter().collect());
        self
    }

    pub fn as_base_field(mut self) -> Self {
        self.base_field = true;
        self
    }

    /// Whether this field can hold the slides of a slideshow.
    pub fn is_media_reference(&self) -> bool {
        self.field_type == FieldType::EntityReference
            && !self.base_field
            && self.target_type.as_deref() == Some(MEDIA_ENTITY_TYPE)
    }
}

// =============================================================================
// SourceField
// =============================================================================

/// Name of the field a source reads its data from.
///
/// Always non-empty. Use [`SourceField::check`] to verify it against the
/// bundle's field definitions when the media type is configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceField(String);

impl SourceField {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::NoSourceField);
        }
        Ok(Self(name))
    }

    pub fn from_configuration(configuration: &SourceConfiguration) -> Result<Self, ConfigError> {
        match configuration.source_field.as_deref() {
            Some(name) => Self::new(name),
            None => Err(ConfigError::NoSourceField),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Find this field among a bundle's definitions.
    pub fn definition<'a>(
        &self,
        definitions: &'a [FieldDefinition],
    ) -> Option<&'a FieldDefinition> {
        definitions.iter().find(|def| def.name == self.0)
    }

    /// Verify the field exists on `bundle` and has one of `allowed` types.
    pub fn check<'a>(
        &self,
        bundle: &BundleId,
        definitions: &'a [FieldDefinition],
        allowed: &[FieldType],
    ) -> Result<&'a FieldDefinition, ConfigError> {
        let def = self
            .definition(definitions)
            .ok_or_else(|| ConfigError::UnknownField {
                field: self.0.clone(),
                bundle: bundle.clone(),
            })?;

        if !allowed.contains(&def.field_type) {
            return Err(ConfigError::InvalidField {
                field: self.0.clone(),
                reason: format!("field type '{}' is not allowed", def.field_type.name()),
            });
        }

        Ok(def)
    }
}
