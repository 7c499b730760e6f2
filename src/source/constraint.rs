use serde::Serialize;

use crate::error::ValidationError;
use crate::media::Media;

/// Constraint a source asks the host to enforce on its entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "constraint")]
pub enum EntityConstraint {
    /// The named reference field must hold at least one item
    ItemsCount {
        #[serde(rename = "sourceFieldName")]
        source_field_name: String,
    },
}

impl EntityConstraint {
    pub const fn name(&self) -> &'static str {
        match self {
            EntityConstraint::ItemsCount { .. } => "ItemsCount",
        }
    }

    /// Check `media` against this constraint.
    pub fn check(&self, media: &Media) -> Result<(), ValidationError> {
        match self {
            EntityConstraint::ItemsCount { source_field_name } => {
                let count = media.references(source_field_name).map_or(0, |items| items.len());
                if count == 0 {
                    return Err(ValidationError::Empty {
                        field: source_field_name.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}
