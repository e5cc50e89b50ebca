use uuid::Uuid;

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_manipulation_rights() {
    assert!(Tool::Select.can_manipulate());
    assert!(!Tool::Preview.can_manipulate());
}

#[test]
fn tool_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Preview).unwrap(), "\"preview\"");
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_all_variants_distinct() {
    let variants = [Button::Primary, Button::Middle, Button::Secondary];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn button_default_is_primary() {
    assert_eq!(Button::default(), Button::Primary);
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_escape_detection() {
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("Delete".into()).is_escape());
    assert!(!Key("escape".into()).is_escape());
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.selected_id.is_none());
    assert_eq!(ui.cursor, Cursor::Default);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}

#[test]
fn idle_and_hovering_are_not_active() {
    assert!(!InputState::Idle.is_active());
    let hovering = InputState::Hovering { id: Uuid::new_v4(), handle: Some(Handle::N) };
    assert!(!hovering.is_active());
    assert!(hovering.active().is_none());
}

#[test]
fn gestures_expose_their_snapshot() {
    let id = Uuid::new_v4();
    let origin = Geometry::new(1.0, 2.0, 30.0, 40.0);
    let start = Point::new(5.0, 5.0);
    let states = [
        InputState::Dragging { id, start, origin },
        InputState::Resizing { id, handle: Handle::Se, start, origin },
        InputState::Rotating { id, start, origin },
    ];
    for state in states {
        assert!(state.is_active());
        assert_eq!(state.active(), Some((id, origin)));
    }
}
