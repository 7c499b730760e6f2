//! Integration tests for library files.
//!
//! These tests verify:
//! - A library document loads from disk into a working store
//! - Sources built from its media types compute metadata and validate
//! - Load errors are reported

use std::io::Write;

use tempfile::NamedTempFile;

use media_slideshow::error::{ConfigError, StorageError, ValidationError};
use media_slideshow::host::{
    ChronoDateFormatter, DefaultMetadata, EntityLookup, MemoryStore, SourceContext,
};
use media_slideshow::media::{BundleId, MediaId};
use media_slideshow::source::{
    validate_media, MediaSource, MetadataValue, SourceRegistry, DEFAULT_MAX_DEPTH, DEFAULT_NAME,
    LENGTH, THUMBNAIL_URI,
};

const LIBRARY: &str = r#"{
    "media_types": [
        { "id": "slideshow_bundle", "label": "Slideshow", "source": "slideshow",
          "source_configuration": { "source_field": "field_slides" } },
        { "id": "image_bundle", "label": "Image", "source": "image",
          "source_configuration": { "source_field": "field_image" } }
    ],
    "fields": {
        "slideshow_bundle": [
            { "name": "field_slides", "label": "Slides", "field_type": "entity_reference",
              "target_type": "media",
              "handler_settings": { "target_bundles": ["image_bundle"] } }
        ],
        "image_bundle": [
            { "name": "field_image", "label": "Image", "field_type": "image" }
        ]
    },
    "media": [
        { "id": 1, "bundle": "image_bundle", "created": 1704103200, "name": "Image media 1",
          "fields": { "field_image": { "uri": "public://images/one.png" } } },
        { "id": 2, "bundle": "image_bundle", "created": 1704103200, "name": "Image media 2",
          "fields": { "field_image": { "uri": "public://images/two.png" } } },
        { "id": 10, "bundle": "slideshow_bundle", "created": 1704103200,
          "name": "My first slideshow",
          "fields": { "field_slides": { "references": [2, 1] } } },
        { "id": 11, "bundle": "slideshow_bundle", "created": 1704103200,
          "fields": { "field_slides": { "references": [] } } },
        { "id": 12, "bundle": "slideshow_bundle", "created": 1704103200,
          "fields": { "field_slides": { "references": [1, 10] } } }
    ]
}"#;

fn write_library(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_library_from_path() {
    let file = write_library(LIBRARY);
    let store = MemoryStore::from_path(file.path()).unwrap();
    let registry =
        SourceRegistry::from_media_types(store.media_types(), DEFAULT_MAX_DEPTH).unwrap();
    let dates = ChronoDateFormatter::utc();
    let fallback = DefaultMetadata::default();
    let cx = SourceContext::new(&store, &store, &registry, &dates, &fallback);

    assert_eq!(store.media_count(), 5);
    assert_eq!(registry.len(), 2);

    let slideshow = store.load_media(MediaId(10)).unwrap();
    let source = registry.get(&slideshow.bundle).unwrap();

    assert_eq!(
        source.metadata(&slideshow, LENGTH, &cx),
        Some(MetadataValue::Count(2))
    );
    assert_eq!(
        source.metadata(&slideshow, DEFAULT_NAME, &cx),
        Some(MetadataValue::Text(
            "2 slides, created on 2024-01-01T10:00:00".to_string()
        ))
    );
    assert_eq!(
        source.metadata(&slideshow, THUMBNAIL_URI, &cx),
        Some(MetadataValue::Text("public://images/two.png".to_string()))
    );
}

#[test]
fn test_library_validation() {
    let store = MemoryStore::from_json(LIBRARY).unwrap();
    let registry =
        SourceRegistry::from_media_types(store.media_types(), DEFAULT_MAX_DEPTH).unwrap();
    let dates = ChronoDateFormatter::utc();
    let fallback = DefaultMetadata::default();
    let cx = SourceContext::new(&store, &store, &registry, &dates, &fallback);

    let results: Vec<(MediaId, Result<(), ValidationError>)> = store
        .all_media()
        .iter()
        .map(|media| (media.id, validate_media(media, &cx)))
        .collect();

    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_ok());
    assert!(results[2].1.is_ok());
    assert_eq!(results[3].0, MediaId(11));
    assert!(matches!(results[3].1, Err(ValidationError::Empty { .. })));
    // Slideshow 12 references slideshow 10, which the field does not allow.
    assert_eq!(results[4].0, MediaId(12));
    assert!(matches!(
        results[4].1,
        Err(ValidationError::IncorrectBundle { item: MediaId(10), .. })
    ));
}

#[test]
fn test_library_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = MemoryStore::from_path(dir.path().join("missing.json"));

    assert!(matches!(result, Err(StorageError::Io(_))));
}

#[test]
fn test_library_unknown_source() {
    let json = r#"{ "media_types": [
        { "id": "remote_video", "label": "Remote video", "source": "oembed:video",
          "source_configuration": { "source_field": "field_url" } }
    ] }"#;
    let store = MemoryStore::from_json(json).unwrap();
    let result = SourceRegistry::from_media_types(store.media_types(), DEFAULT_MAX_DEPTH);

    assert!(matches!(result, Err(ConfigError::UnknownSource { .. })));
}

#[test]
fn test_library_with_unconfigured_bundle() {
    let json = r#"{
        "media_types": [
            { "id": "new_slideshow", "label": "New slideshow", "source": "slideshow" },
            { "id": "image_bundle", "label": "Image", "source": "image",
              "source_configuration": { "source_field": "field_image" } }
        ],
        "fields": {
            "new_slideshow": [
                { "name": "field_slides", "label": "Slides", "field_type": "entity_reference",
                  "target_type": "media" }
            ],
            "image_bundle": [
                { "name": "field_image", "label": "Image", "field_type": "image" }
            ]
        },
        "media": [
            { "id": 1, "bundle": "image_bundle", "created": 1704103200,
              "fields": { "field_image": { "uri": "public://images/one.png" } } },
            { "id": 20, "bundle": "new_slideshow", "created": 1704103200,
              "fields": { "field_slides": { "references": [] } } }
        ]
    }"#;
    let store = MemoryStore::from_json(json).unwrap();
    let registry =
        SourceRegistry::from_media_types(store.media_types(), DEFAULT_MAX_DEPTH).unwrap();
    let dates = ChronoDateFormatter::utc();
    let fallback = DefaultMetadata::default();
    let cx = SourceContext::new(&store, &store, &registry, &dates, &fallback);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.unconfigured(), &[BundleId::from("new_slideshow")]);

    // The configured bundle keeps working.
    let image = store.load_media(MediaId(1)).unwrap();
    let source = registry.get(&image.bundle).unwrap();
    assert!(source.check_configuration(&image.bundle, &store).is_ok());
    assert_eq!(
        source.metadata(&image, THUMBNAIL_URI, &cx),
        Some(MetadataValue::Text("public://images/one.png".to_string()))
    );

    // Media of the unconfigured bundle have no source to enforce.
    let draft = store.load_media(MediaId(20)).unwrap();
    assert!(registry.get(&draft.bundle).is_none());
    assert!(validate_media(&draft, &cx).is_ok());
}
