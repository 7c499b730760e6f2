use serde::Serialize;

use crate::media::FieldDefinition;

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Select control of a media type settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    pub name: String,
    pub title: String,
    pub description: String,

    /// Pre-selected value, if any
    pub default_value: Option<String>,

    pub options: Vec<SelectOption>,

    /// Whether an empty selection is rejected
    pub required: bool,
}

impl SelectField {
    /// Values of all options, in display order.
    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|opt| opt.value.as_str()).collect()
    }
}

/// Build the `source_field` select from a bundle's field definitions.
///
/// Options keep definition order. The selection may be left empty so a
/// bundle can be configured before its source field exists.
pub fn source_field_select<'a>(
    definitions: impl IntoIterator<Item = &'a FieldDefinition>,
    current: Option<&str>,
    description: &str,
    eligible: impl Fn(&FieldDefinition) -> bool,
) -> SelectField {
    let options = definitions
        .into_iter()
        .filter(|def| eligible(def))
        .map(|def| SelectOption {
            value: def.name.clone(),
            label: def.label.clone(),
        })
        .collect();

    SelectField {
        name: "source_field".to_string(),
        title: "Field with source information".to_string(),
        description: description.to_string(),
        default_value: current.filter(|name| !name.is_empty()).map(str::to_string),
        options,
        required: false,
    }
}
