#![forbid(unsafe_code)]

//! JSON configuration loading. Requires the `serde` feature.

use std::time::Duration;

use sparsegrid_layout::{ConfigError, ZoomLevel};
use sparsegrid_widgets::GridConfig;

#[test]
fn partial_document_keeps_defaults() {
    let config = GridConfig::from_json(
        r#"{
            "zoom_ladder": [50, 100, 200],
            "layout": { "item_spacing": 2.0 },
            "fast_scroll": { "label_height": 28.0 }
        }"#,
    )
    .unwrap();

    let defaults = GridConfig::default();
    assert_eq!(
        config.zoom_ladder.levels(),
        &[ZoomLevel::new(50), ZoomLevel::new(100), ZoomLevel::new(200)]
    );
    assert_eq!(config.layout.item_spacing, 2.0);
    assert_eq!(config.layout.max_item_width, defaults.layout.max_item_width);
    assert_eq!(config.fast_scroll.label_height, 28.0);
    assert_eq!(config.fast_scroll.dwell_delay, defaults.fast_scroll.dwell_delay);
    assert_eq!(config.zoom, defaults.zoom);
    assert_eq!(config.initial_zoom, ZoomLevel::DEFAULT);
}

#[test]
fn empty_document_is_the_default() {
    assert_eq!(GridConfig::from_json("{}").unwrap(), GridConfig::default());
}

#[test]
fn initial_zoom_off_the_ladder_is_rejected() {
    assert_eq!(
        GridConfig::from_json(r#"{"initial_zoom": 33}"#),
        Err(ConfigError::InitialZoomNotOnLadder(33))
    );
}

#[test]
fn unsorted_ladder_is_a_parse_error() {
    let err = GridConfig::from_json(r#"{"zoom_ladder": [100, 50]}"#).unwrap_err();
    let ConfigError::Parse(message) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert!(message.contains("strictly increasing"), "{message}");
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        GridConfig::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn durations_use_serde_layout() {
    let config = GridConfig::from_json(
        r#"{"scroll_animation_duration": {"secs": 1, "nanos": 500000000}}"#,
    )
    .unwrap();
    assert_eq!(config.scroll_animation_duration, Duration::from_millis(1_500));
}

#[test]
fn default_survives_serialization() {
    let json = serde_json::to_string(&GridConfig::default()).unwrap();
    assert_eq!(GridConfig::from_json(&json).unwrap(), GridConfig::default());
}
