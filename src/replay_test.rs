#![allow(clippy::float_cmp)]

use std::path::PathBuf;

use serde_json::json;

use super::*;
use crate::element::{ElementKind, Geometry};

fn scenario_with(events: Vec<Event>) -> Scenario {
    Scenario {
        elements: vec![LabelElement::new(ElementKind::Image, Geometry::new(0.0, 0.0, 100.0, 50.0))],
        events,
        ..Scenario::default()
    }
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_minimal_scenario_uses_defaults() {
    let scenario = parse(r#"{ "elements": [] }"#).unwrap();
    assert_eq!(scenario.viewport, Viewport::default());
    assert_eq!(scenario.config, ConfigOverrides::default());
    assert!(scenario.events.is_empty());
}

#[test]
fn parse_every_event_kind() {
    let raw = json!({
        "elements": [],
        "events": [
            { "type": "down", "x": 1.0, "y": 2.0 },
            { "type": "down", "x": 1.0, "y": 2.0, "button": "secondary" },
            { "type": "move", "x": 3.0, "y": 4.0 },
            { "type": "up", "x": 3.0, "y": 4.0 },
            { "type": "leave" },
            { "type": "cancel" },
            { "type": "key", "key": "Escape" },
            { "type": "tool", "tool": "preview" }
        ]
    });
    let scenario: Scenario = serde_json::from_value(raw).unwrap();
    assert_eq!(
        scenario.events,
        vec![
            Event::Down { x: 1.0, y: 2.0, button: Button::Primary },
            Event::Down { x: 1.0, y: 2.0, button: Button::Secondary },
            Event::Move { x: 3.0, y: 4.0 },
            Event::Up { x: 3.0, y: 4.0, button: Button::Primary },
            Event::Leave,
            Event::Cancel,
            Event::Key { key: "Escape".into() },
            Event::Tool { tool: Tool::Preview },
        ]
    );
}

#[test]
fn parse_partial_viewport_and_config() {
    let scenario = parse(r#"{ "viewport": { "scale": 2.0 }, "config": { "handle_size": 6.0 }, "elements": [] }"#).unwrap();
    assert_eq!(scenario.viewport.scale, 2.0);
    assert_eq!(scenario.viewport.offset_x, 0.0);
    assert_eq!(scenario.config.handle_size, Some(6.0));
    assert_eq!(scenario.config.rotation_handle_offset, None);
}

#[test]
fn parse_unknown_event_is_json_error() {
    let err = parse(r#"{ "elements": [], "events": [{ "type": "wheel" }] }"#).unwrap_err();
    assert!(matches!(err, ReplayError::Json(_)));
}

#[test]
fn load_missing_file_is_io_error() {
    let path = PathBuf::from("definitely/not/here/scenario.json");
    assert!(matches!(load(&path), Err(ReplayError::Io(_))));
}

#[test]
fn config_error_converts() {
    let err: ReplayError = ConfigError::InvalidNumber { var: "X", value: "nope".into() }.into();
    assert!(err.to_string().contains("nope"));
}

// =============================================================
// Running
// =============================================================

#[test]
fn run_without_events_returns_elements_unchanged() {
    let scenario = scenario_with(Vec::new());
    let outcome = run(&scenario).unwrap();
    assert_eq!(outcome.elements, scenario.elements);
    assert_eq!(outcome.actions_emitted, 0);
    assert!(outcome.selected.is_none());
}

#[test]
fn run_drag_commits_once() {
    let scenario = scenario_with(vec![
        Event::Down { x: 50.0, y: 25.0, button: Button::Primary },
        Event::Move { x: 60.0, y: 25.0 },
        Event::Up { x: 70.0, y: 35.0, button: Button::Primary },
    ]);
    let outcome = run(&scenario).unwrap();
    assert_eq!(outcome.committed, 1);
    assert_eq!(outcome.selected, Some(scenario.elements[0].id));
    assert_eq!(outcome.elements[0].geometry.x, 20.0);
    assert_eq!(outcome.elements[0].geometry.y, 10.0);
    assert!(outcome.actions_emitted > 0);
}

#[test]
fn run_escape_mid_drag_restores() {
    let scenario = scenario_with(vec![
        Event::Down { x: 50.0, y: 25.0, button: Button::Primary },
        Event::Move { x: 90.0, y: 90.0 },
        Event::Key { key: "Escape".into() },
        Event::Up { x: 90.0, y: 90.0, button: Button::Primary },
    ]);
    let outcome = run(&scenario).unwrap();
    assert_eq!(outcome.committed, 0);
    assert_eq!(outcome.elements, scenario.elements);
}

#[test]
fn run_respects_viewport_scale() {
    let mut scenario = scenario_with(vec![
        Event::Down { x: 100.0, y: 50.0, button: Button::Primary },
        Event::Up { x: 140.0, y: 50.0, button: Button::Primary },
    ]);
    scenario.viewport = Viewport::with_scale(2.0);
    let outcome = run(&scenario).unwrap();
    assert_eq!(outcome.elements[0].geometry.x, 20.0);
}

#[test]
fn outcome_serializes_elements_flat() {
    let outcome = run(&scenario_with(Vec::new())).unwrap();
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["elements"][0]["type"], "image");
    assert_eq!(value["actions_emitted"], 0);
    assert!(value["selected"].is_null());
}

// =============================================================
// Config merging and validation
// =============================================================

fn drag_right_by(device_dx: f64) -> Vec<Event> {
    vec![
        Event::Down { x: 50.0, y: 25.0, button: Button::Primary },
        Event::Move { x: 50.0 + device_dx, y: 25.0 },
        Event::Up { x: 50.0 + device_dx, y: 25.0, button: Button::Primary },
    ]
}

#[test]
fn partial_config_block_keeps_base_for_other_field() {
    let mut scenario = scenario_with(Vec::new());
    scenario.config = ConfigOverrides { handle_size: Some(6.0), ..ConfigOverrides::default() };
    let base = EngineConfig { handle_size: 8.0, rotation_handle_offset: 40.0 };

    // A press 40 units above the top-center only hits the rotate handle if the base offset survived.
    scenario.events = vec![
        Event::Down { x: 50.0, y: 25.0, button: Button::Primary },
        Event::Up { x: 50.0, y: 25.0, button: Button::Primary },
        Event::Down { x: 50.0, y: -40.0, button: Button::Primary },
        Event::Move { x: 150.0, y: 25.0 },
        Event::Up { x: 150.0, y: 25.0, button: Button::Primary },
    ];
    let outcome = run_with(&scenario, base).unwrap();
    assert!((outcome.elements[0].geometry.rotation - 90.0).abs() < 1e-9);
}

#[test]
fn negative_handle_size_is_rejected() {
    let scenario = parse(r#"{ "config": { "handle_size": -5.0 }, "elements": [] }"#).unwrap();
    let err = run(&scenario).unwrap_err();
    assert!(matches!(
        err,
        ReplayError::Config(ConfigError::NotPositive { field: "handle_size", .. })
    ));
}

#[test]
fn zero_rotation_offset_is_rejected() {
    let mut scenario = scenario_with(drag_right_by(10.0));
    scenario.config.rotation_handle_offset = Some(0.0);
    assert!(matches!(run(&scenario), Err(ReplayError::Config(_))));
}

#[test]
fn invalid_base_config_is_rejected() {
    let scenario = scenario_with(Vec::new());
    let base = EngineConfig { handle_size: f64::NAN, rotation_handle_offset: 24.0 };
    assert!(matches!(run_with(&scenario, base), Err(ReplayError::Config(_))));
}

#[test]
fn zero_and_non_finite_scale_are_rejected() {
    for scale in [0.0, -2.0, f64::INFINITY, f64::NAN] {
        let mut scenario = scenario_with(drag_right_by(10.0));
        scenario.viewport.scale = scale;
        assert!(matches!(run(&scenario), Err(ReplayError::InvalidScale(_))), "{scale}");
    }
}

#[test]
fn zero_scale_from_json_is_an_error_not_a_silent_noop() {
    let scenario = parse(
        r#"{
            "viewport": { "scale": 0 },
            "elements": [{ "type": "image", "x": 0, "y": 0, "width": 100, "height": 50 }],
            "events": [
                { "type": "down", "x": 50, "y": 25 },
                { "type": "move", "x": 70, "y": 25 },
                { "type": "up", "x": 70, "y": 25 }
            ]
        }"#,
    )
    .unwrap();
    let err = run(&scenario).unwrap_err();
    assert_eq!(err.to_string(), "viewport scale must be a positive number, got 0");
}
