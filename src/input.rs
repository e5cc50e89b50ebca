//! Input model: tools, mouse buttons, keys, and the gesture state machine states.
//!
//! `Tool` captures what pointer input is allowed to do. `UiState` holds the
//! selection, which outlives any single gesture. `InputState` is the gesture
//! being tracked between pointer-down and pointer-up; every active variant
//! carries the pointer position and element geometry captured at press time,
//! so each move recomputes from that snapshot plus the total pointer movement
//! instead of accumulating per-event deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, Geometry};
use crate::hit::{Cursor, Handle};
use crate::units::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, move, resize and rotate elements (default).
    #[default]
    Select,
    /// The label is locked: pointer input hovers and selects but never edits geometry.
    Preview,
}

impl Tool {
    /// Whether this tool may start a drag, resize or rotate gesture.
    #[must_use]
    pub fn can_manipulate(self) -> bool {
        matches!(self, Self::Select)
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    #[default]
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// Cursor hint last sent to the host.
    pub cursor: Cursor,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No element under the pointer and no gesture in progress.
    #[default]
    Idle,
    /// The pointer is over an element (and optionally one of its handles) with no button held.
    Hovering {
        /// Element under the pointer.
        id: ElementId,
        /// Handle under the pointer, if the element is selected and a handle was hit.
        handle: Option<Handle>,
    },
    /// The user is moving an element.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Label-space pointer position at press time.
        start: Point,
        /// Element geometry at press time.
        origin: Geometry,
    },
    /// The user is resizing an element by one of its eight handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner/edge handle is being dragged.
        handle: Handle,
        /// Label-space pointer position at press time.
        start: Point,
        /// Element geometry at press time.
        origin: Geometry,
    },
    /// The user is rotating an element by its rotate handle.
    Rotating {
        /// Id of the element being rotated.
        id: ElementId,
        /// Label-space pointer position at press time.
        start: Point,
        /// Element geometry at press time.
        origin: Geometry,
    },
}

impl InputState {
    /// The element and press-time geometry of an active gesture, if any.
    #[must_use]
    pub fn active(&self) -> Option<(ElementId, Geometry)> {
        match self {
            Self::Dragging { id, origin, .. } | Self::Resizing { id, origin, .. } | Self::Rotating { id, origin, .. } => {
                Some((*id, *origin))
            }
            Self::Idle | Self::Hovering { .. } => None,
        }
    }

    /// Whether a drag, resize or rotate is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }
}
