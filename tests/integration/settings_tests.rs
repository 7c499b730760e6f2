//! Integration tests for the slideshow settings form and source field checks.
//!
//! These tests verify:
//! - Only non-base entity reference fields targeting media are offered
//! - Options keep field definition order
//! - The configured field is pre-selected
//! - Misconfigured source fields are reported

use media_slideshow::error::ConfigError;
use media_slideshow::host::MemoryStore;
use media_slideshow::media::{BundleId, FieldDefinition, FieldType, SourceConfiguration};
use media_slideshow::source::{MediaSource, SlideshowSource};

use super::test_utils::*;

const BUNDLE: &str = "gallery";

fn gallery_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set_fields(
        BundleId::from(BUNDLE),
        vec![
            FieldDefinition::new("name", "Name", FieldType::String).as_base_field(),
            FieldDefinition::media_reference("field_slides", "Slides"),
            FieldDefinition::new("field_related", "Related content", FieldType::EntityReference)
                .with_target_type("node"),
            FieldDefinition::media_reference("field_thumbnail", "Thumbnail").as_base_field(),
            FieldDefinition::new("field_caption", "Caption", FieldType::String),
            FieldDefinition::media_reference("field_extra", "Extra slides"),
            FieldDefinition::new("field_cover", "Cover", FieldType::Image),
        ],
    );
    store
}

fn source(field: &str) -> SlideshowSource {
    SlideshowSource::new(&SourceConfiguration::with_source_field(field)).unwrap()
}

// =============================================================================
// Settings Form
// =============================================================================

#[test]
fn test_settings_options_are_media_references() {
    let store = gallery_store();
    let form = SlideshowSource::settings_form_for(&BundleId::from(BUNDLE), None, &store);

    assert_eq!(form.option_values(), vec!["field_slides", "field_extra"]);
    assert_eq!(form.options[1].label, "Extra slides");
    assert_eq!(form.name, "source_field");
    assert_eq!(form.title, "Field with source information");
    assert_eq!(
        form.description,
        "Field on media entity that stores slideshow items."
    );
    assert_eq!(form.default_value, None);
    assert!(!form.required);
}

#[test]
fn test_settings_preselects_configured_field() {
    let store = gallery_store();
    let form = source("field_extra").settings_form(&BundleId::from(BUNDLE), &store);

    assert_eq!(form.default_value.as_deref(), Some("field_extra"));
    assert_eq!(form.option_values(), vec!["field_slides", "field_extra"]);
}

#[test]
fn test_settings_for_bundle_without_fields() {
    let store = MemoryStore::new();
    let form = SlideshowSource::settings_form_for(&BundleId::from("new_bundle"), None, &store);

    assert!(form.options.is_empty());
}

#[test]
fn test_settings_form_json() {
    let store = gallery_store();
    let form = source("field_slides").settings_form(&BundleId::from(BUNDLE), &store);
    let json = serde_json::to_value(&form).unwrap();

    assert_eq!(json["name"], "source_field");
    assert_eq!(json["default_value"], "field_slides");
    assert_eq!(json["options"][0]["value"], "field_slides");
    assert_eq!(json["options"][0]["label"], "Slides");
}

// =============================================================================
// Source Field Checks
// =============================================================================

#[test]
fn test_check_configuration_valid() {
    let store = gallery_store();
    let bundle = BundleId::from(BUNDLE);

    assert!(source("field_slides")
        .check_configuration(&bundle, &store)
        .is_ok());
    assert!(source("field_extra")
        .check_configuration(&bundle, &store)
        .is_ok());
}

#[test]
fn test_check_configuration_errors() {
    let store = gallery_store();
    let bundle = BundleId::from(BUNDLE);

    assert!(matches!(
        source("field_missing").check_configuration(&bundle, &store),
        Err(ConfigError::UnknownField { .. })
    ));
    assert!(matches!(
        source("field_caption").check_configuration(&bundle, &store),
        Err(ConfigError::InvalidField { .. })
    ));
    assert!(matches!(
        source("field_thumbnail").check_configuration(&bundle, &store),
        Err(ConfigError::InvalidField { ref reason, .. }) if reason.contains("base")
    ));
    assert!(matches!(
        source("field_related").check_configuration(&bundle, &store),
        Err(ConfigError::InvalidField { ref reason, .. }) if reason.contains("node")
    ));
}

#[test]
fn test_fixture_sources_configured() {
    let fixture = Fixture::new();

    for (bundle, source) in fixture.registry.iter() {
        assert!(
            source.check_configuration(bundle, &fixture.store).is_ok(),
            "bundle {} misconfigured",
            bundle
        );
    }
}

#[test]
fn test_image_source_rejects_file_field() {
    let mut store = MemoryStore::new();
    store.set_fields(
        BundleId::from("pictures"),
        vec![FieldDefinition::new("field_media", "Media", FieldType::File)],
    );

    let image = media_slideshow::source::FileSource::image(
        &SourceConfiguration::with_source_field("field_media"),
    )
    .unwrap();
    assert!(image
        .check_configuration(&BundleId::from("pictures"), &store)
        .is_err());

    let file = media_slideshow::source::FileSource::file(
        &SourceConfiguration::with_source_field("field_media"),
    )
    .unwrap();
    assert!(file
        .check_configuration(&BundleId::from("pictures"), &store)
        .is_ok());
}
