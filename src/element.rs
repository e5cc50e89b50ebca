//! Element model: placed label items, their geometry, and the ordered label store.
//!
//! This module defines what sits on a label (`LabelElement`, `ElementKind`),
//! the plain geometry record every computation works on (`Geometry`), the
//! sparse-update type produced by resize/rotate/move (`GeometryPatch`), and the
//! ordered store the state machine mutates (`Label`).
//!
//! Elements are created and removed by the surrounding editor. The engine only
//! merges `GeometryPatch` values into elements it is handed.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{TEXT_HIT_PAD_X, TEXT_HIT_PAD_Y};
use crate::units::Point;

/// Unique identifier for a label element.
pub type ElementId = Uuid;

/// The kind of a label element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A run of text rendered inside the bounding box.
    Text,
    /// An uploaded or gallery image stretched to the bounding box.
    Image,
}

impl ElementKind {
    /// Extra hit-test slack `(horizontal, vertical)` added to each half-extent.
    #[must_use]
    pub fn hit_padding(self) -> (f64, f64) {
        match self {
            Self::Text => (TEXT_HIT_PAD_X, TEXT_HIT_PAD_Y),
            Self::Image => (0.0, 0.0),
        }
    }
}

fn unit_scale() -> f64 {
    1.0
}

/// Position, size, scale and rotation of one element, in label units.
///
/// `x` / `y` are the top-left of the unscaled, unrotated box. Scale and
/// rotation are both applied about the box center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
    /// Clockwise rotation in degrees around the center. Not normalized.
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    /// Unscaled, unrotated box at `(x, y)` with the given size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, scale_x: 1.0, scale_y: 1.0, rotation: 0.0 }
    }

    /// Center of the box; the pivot for scale and rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Rendered half-extents `(hw, hh)` after scale.
    #[must_use]
    pub fn half_extents(&self) -> (f64, f64) {
        ((self.width * self.scale_x).abs() / 2.0, (self.height * self.scale_y).abs() / 2.0)
    }

    /// Merge the present fields of `patch` into this geometry.
    pub fn apply(&mut self, patch: &GeometryPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
    }

    /// Patch holding the fields of `other` that differ from `self`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn diff(&self, other: &Geometry) -> GeometryPatch {
        let changed = |a: f64, b: f64| (a != b).then_some(b);
        GeometryPatch {
            x: changed(self.x, other.x),
            y: changed(self.y, other.y),
            width: changed(self.width, other.width),
            height: changed(self.height, other.height),
            rotation: changed(self.rotation, other.rotation),
        }
    }

    /// A patch that sets every field a gesture can touch back to this geometry.
    #[must_use]
    pub fn to_patch(&self) -> GeometryPatch {
        GeometryPatch {
            x: Some(self.x),
            y: Some(self.y),
            width: Some(self.width),
            height: Some(self.height),
            rotation: Some(self.rotation),
        }
    }
}

/// One placed item on the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelElement {
    /// Unique identifier, fixed for the element's lifetime. Minted when absent from input.
    #[serde(default = "Uuid::new_v4")]
    pub id: ElementId,
    /// Text or image.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Where the element sits on the label.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Text body or image asset reference. Opaque to the engine.
    #[serde(default)]
    pub content: String,
}

impl LabelElement {
    /// New element with a fresh id.
    #[must_use]
    pub fn new(kind: ElementKind, geometry: Geometry) -> Self {
        Self { id: Uuid::new_v4(), kind, geometry, content: String::new() }
    }

    /// Merge the present fields of `patch` into this element's geometry.
    pub fn apply(&mut self, patch: &GeometryPatch) {
        self.geometry.apply(patch);
    }
}

/// Sparse geometry update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryPatch {
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New rotation in degrees, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl GeometryPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.rotation.is_none()
    }
}

/// The elements of one label, in paint order (first drawn first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label {
    elements: Vec<LabelElement>,
}

impl Label {
    /// Create an empty label.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Build a label from elements already in paint order.
    #[must_use]
    pub fn from_elements(elements: Vec<LabelElement>) -> Self {
        let mut label = Self::new();
        for element in elements {
            label.push(element);
        }
        label
    }

    /// Add an element on top of the stack. An element with the same `id` is
    /// replaced in place and keeps its stacking position.
    pub fn push(&mut self, element: LabelElement) {
        match self.position(&element.id) {
            Some(idx) => self.elements[idx] = element,
            None => self.elements.push(element),
        }
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<LabelElement> {
        let idx = self.position(id)?;
        Some(self.elements.remove(idx))
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&LabelElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Return a mutable reference to an element by id.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut LabelElement> {
        self.elements.iter_mut().find(|e| e.id == *id)
    }

    /// Apply a partial update to an existing element. Returns false if the element doesn't exist.
    pub fn apply_patch(&mut self, id: &ElementId, patch: &GeometryPatch) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        element.apply(patch);
        true
    }

    /// Elements in paint order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LabelElement> {
        self.elements.iter()
    }

    /// Elements in reverse paint order (topmost first), for hit-testing.
    pub fn iter_topmost(&self) -> impl Iterator<Item = &LabelElement> {
        self.elements.iter().rev()
    }

    /// All elements as a slice, in paint order.
    #[must_use]
    pub fn elements(&self) -> &[LabelElement] {
        &self.elements
    }

    /// Number of elements on the label.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the label has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == *id)
    }
}
