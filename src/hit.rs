//! Hit-testing: which element, and which part of it, is under a pointer.
//!
//! Per-element predicates live in [`crate::geometry`]; this module applies the
//! pointer-down precedence across a whole label. The selected element's handles
//! are tested first, then element bodies from the topmost element down.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::element::{ElementId, Label};
use crate::geometry;
use crate::units::Point;

/// A manipulation hotspot on the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    E,
    W,
    /// The rotation dot drawn above the top edge.
    Rotate,
}

impl Handle {
    /// Corner handles, in hit-test order.
    pub const CORNERS: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// Edge handles, in hit-test order.
    pub const EDGES: [Handle; 4] = [Handle::N, Handle::S, Handle::E, Handle::W];

    /// Whether dragging this handle resizes (as opposed to rotates).
    #[must_use]
    pub fn is_resize(self) -> bool {
        !matches!(self, Self::Rotate)
    }

    /// Sign of the local-frame position of this handle on each axis:
    /// `-1` for the left/top edge, `1` for right/bottom, `0` for centered.
    #[must_use]
    pub fn local_sign(self) -> (f64, f64) {
        match self {
            Self::Nw => (-1.0, -1.0),
            Self::Ne => (1.0, -1.0),
            Self::Sw => (-1.0, 1.0),
            Self::Se => (1.0, 1.0),
            Self::N | Self::Rotate => (0.0, -1.0),
            Self::S => (0.0, 1.0),
            Self::E => (1.0, 0.0),
            Self::W => (-1.0, 0.0),
        }
    }

    /// Cursor affordance to show while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Nw | Self::Se => Cursor::NwseResize,
            Self::Ne | Self::Sw => Cursor::NeswResize,
            Self::N | Self::S => Cursor::NsResize,
            Self::E | Self::W => Cursor::EwResize,
            Self::Rotate => Cursor::Grab,
        }
    }
}

/// Pointer cursor hint for the host. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    /// Over an element body; dragging moves it.
    Move,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
    /// Over the rotate handle.
    Grab,
    /// While a rotation is in progress.
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` keyword for this hint.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

impl Hit {
    /// The handle that was hit, if any.
    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        match self.part {
            HitPart::Handle(handle) => Some(handle),
            HitPart::Body => None,
        }
    }
}

/// Test which element (if any) is under `pt`.
///
/// The selected element's handles win over any body, even one drawn above it.
/// Bodies are then tested topmost first, so the last-painted element wins on overlap.
#[must_use]
pub fn hit_test(pt: Point, label: &Label, selected_id: Option<ElementId>, config: &EngineConfig) -> Option<Hit> {
    if let Some(selected) = selected_id.and_then(|id| label.get(&id)) {
        let handle =
            geometry::hit_handle(pt, &selected.geometry, config.handle_size, config.rotation_handle_offset);
        if let Some(handle) = handle {
            return Some(Hit { element_id: selected.id, part: HitPart::Handle(handle) });
        }
    }

    label
        .iter_topmost()
        .find(|el| geometry::contains_point(pt, el))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}
