//! Stateless geometry for a single element, in label units.
//!
//! Every predicate here first maps the query point into the element's local
//! frame (origin at the box center, axes aligned with the unrotated box) with
//! [`to_local`]. Comparisons are then plain axis-aligned checks against the
//! scaled half-extents. [`to_world`] is the exact inverse and is what corner
//! and handle positions for drawing go through, so the drawn chrome and the
//! hit-tested chrome come from the same numbers.
//!
//! Functions never mutate their input. Resize, rotate and move return a
//! [`GeometryPatch`] for the caller to merge.
//!
//! All functions are total over finite inputs. Non-finite inputs propagate NaN.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::{AXIS_ALIGNED_EPSILON_DEG, MIN_ELEMENT_SIZE, ROTATION_REFERENCE_DEG};
use crate::element::{Geometry, GeometryPatch, LabelElement};
use crate::hit::Handle;
use crate::units::Point;

/// Normalize an angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Whether `rotation` is close enough to a multiple of 360° to treat the box as unrotated.
#[must_use]
pub fn is_axis_aligned(rotation: f64) -> bool {
    let r = normalize_degrees(rotation);
    r < AXIS_ALIGNED_EPSILON_DEG || r > 360.0 - AXIS_ALIGNED_EPSILON_DEG
}

/// Map a label-space point into the element's local frame.
#[must_use]
pub fn to_local(pt: Point, geometry: &Geometry) -> Point {
    (pt - geometry.center()).rotated(-geometry.rotation)
}

/// Map a local-frame point back to label space. Inverse of [`to_local`].
#[must_use]
pub fn to_world(local: Point, geometry: &Geometry) -> Point {
    local.rotated(geometry.rotation) + geometry.center()
}

/// Whether `pt` lies on the element's body, including its kind's tap padding.
#[must_use]
pub fn contains_point(pt: Point, element: &LabelElement) -> bool {
    let local = to_local(pt, &element.geometry);
    let (hw, hh) = element.geometry.half_extents();
    let (pad_x, pad_y) = element.kind.hit_padding();
    local.x.abs() <= hw + pad_x && local.y.abs() <= hh + pad_y
}

/// Local-frame center of a handle. The rotate handle sits `rotation_handle_offset`
/// above the top edge.
#[must_use]
pub fn handle_local_position(handle: Handle, geometry: &Geometry, rotation_handle_offset: f64) -> Point {
    let (hw, hh) = geometry.half_extents();
    if handle == Handle::Rotate {
        return Point::new(0.0, -hh - rotation_handle_offset);
    }
    let (sx, sy) = handle.local_sign();
    Point::new(sx * hw, sy * hh)
}

/// Which handle (if any) is under `pt`.
///
/// Tested in order: the rotate handle (a circle of radius `handle_size`), the
/// four corners (squares of half-width `handle_size`), then the four edges
/// (a band `handle_size` either side of the edge line, limited to its span).
/// `handle_size` and `rotation_handle_offset` must match what the host draws.
#[must_use]
pub fn hit_handle(pt: Point, geometry: &Geometry, handle_size: f64, rotation_handle_offset: f64) -> Option<Handle> {
    let local = to_local(pt, geometry);
    let (hw, hh) = geometry.half_extents();

    let rotate = handle_local_position(Handle::Rotate, geometry, rotation_handle_offset);
    if (local.x - rotate.x).hypot(local.y - rotate.y) <= handle_size {
        return Some(Handle::Rotate);
    }

    for corner in Handle::CORNERS {
        let c = handle_local_position(corner, geometry, rotation_handle_offset);
        if (local.x - c.x).abs() <= handle_size && (local.y - c.y).abs() <= handle_size {
            return Some(corner);
        }
    }

    let within_x_span = local.x.abs() <= hw;
    let within_y_span = local.y.abs() <= hh;
    Handle::EDGES.into_iter().find(|edge| match edge {
        Handle::N => within_x_span && (local.y + hh).abs() <= handle_size,
        Handle::S => within_x_span && (local.y - hh).abs() <= handle_size,
        Handle::E => within_y_span && (local.x - hw).abs() <= handle_size,
        Handle::W => within_y_span && (local.x + hw).abs() <= handle_size,
        _ => false,
    })
}

/// New `{x, y, width, height}` after dragging `handle` by `delta` (label space).
///
/// For a rotated element the delta is first expressed along the element's own
/// axes, so dragging the east handle always widens the box along its local X
/// regardless of how it is turned on screen. Width and height never drop below
/// [`MIN_ELEMENT_SIZE`]; when clamped, the edge opposite the handle keeps its
/// label-space position, rotated or not.
///
/// The delta is applied to the unscaled `width`/`height`, so with a non-unit
/// `scale_x`/`scale_y` the rendered edge moves `scale` times as far as the pointer.
///
/// `Handle::Rotate` is not a resize handle and yields an empty patch.
#[must_use]
pub fn resize(geometry: &Geometry, handle: Handle, delta: Point) -> GeometryPatch {
    if !handle.is_resize() {
        return GeometryPatch::default();
    }

    let axis_aligned = is_axis_aligned(geometry.rotation);
    let local = if axis_aligned {
        delta
    } else {
        // ldx = dx·cosθ + dy·sinθ, ldy = −dx·sinθ + dy·cosθ
        delta.rotated(-geometry.rotation)
    };
    let (sx, sy) = handle.local_sign();

    let across = resize_axis(geometry.x, geometry.width, local.x, sx);
    let down = resize_axis(geometry.y, geometry.height, local.y, sy);
    let (x, y) = if axis_aligned || !(across.pinned || down.pinned) {
        (across.origin, down.origin)
    } else {
        pinned_origin(geometry, (sx, sy), &across, &down)
    };

    GeometryPatch { x: Some(x), y: Some(y), width: Some(across.size), height: Some(down.size), rotation: None }
}

/// One axis of a resize: new origin and size along unrotated x or y.
struct AxisResize {
    origin: f64,
    size: f64,
    /// Clamped to the floor by a handle that moves one edge of this axis.
    pinned: bool,
}

/// West/north (`sign < 0`) move the origin and shrink; east/south grow in place.
fn resize_axis(origin: f64, size: f64, delta: f64, sign: f64) -> AxisResize {
    let (mut new_origin, mut new_size) = if sign < 0.0 {
        (origin + delta, size - delta)
    } else if sign > 0.0 {
        (origin, size + delta)
    } else {
        (origin, size)
    };

    let mut pinned = false;
    if new_size < MIN_ELEMENT_SIZE {
        new_size = MIN_ELEMENT_SIZE;
        if sign < 0.0 {
            new_origin = origin + size - MIN_ELEMENT_SIZE;
        }
        pinned = sign < 0.0 || sign > 0.0;
    }
    AxisResize { origin: new_origin, size: new_size, pinned }
}

/// Top-left for a rotated box where at least one axis hit the floor.
///
/// The center moves along each local axis. A pinned axis shifts the center so
/// the opposite edge stays where it was in label space; an unpinned axis keeps
/// the shift the plain x/y mapping would give.
fn pinned_origin(geometry: &Geometry, (sx, sy): (f64, f64), across: &AxisResize, down: &AxisResize) -> (f64, f64) {
    let (hw, hh) = geometry.half_extents();
    let resized = Geometry { width: across.size, height: down.size, ..*geometry };
    let (new_hw, new_hh) = resized.half_extents();

    let x_shift = if across.pinned {
        Point::new(sx * (new_hw - hw), 0.0).rotated(geometry.rotation)
    } else {
        Point::new(across.origin - geometry.x + (across.size - geometry.width) / 2.0, 0.0)
    };
    let y_shift = if down.pinned {
        Point::new(0.0, sy * (new_hh - hh)).rotated(geometry.rotation)
    } else {
        Point::new(0.0, down.origin - geometry.y + (down.size - geometry.height) / 2.0)
    };

    let center = geometry.center() + x_shift + y_shift;
    (center.x - across.size / 2.0, center.y - down.size / 2.0)
}

/// Rotation that points the element's rotate handle at `pointer`.
///
/// Pointer straight above the center gives 0°, straight right gives 90°.
#[must_use]
pub fn rotation_toward(geometry: &Geometry, pointer: Point) -> GeometryPatch {
    let center = geometry.center();
    let angle = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees();
    let rotation = normalize_degrees(normalize_degrees(angle) + ROTATION_REFERENCE_DEG);
    GeometryPatch { rotation: Some(rotation), ..GeometryPatch::default() }
}

/// New `{x, y}` after dragging the body by `delta`.
#[must_use]
pub fn move_by(geometry: &Geometry, delta: Point) -> GeometryPatch {
    GeometryPatch { x: Some(geometry.x + delta.x), y: Some(geometry.y + delta.y), ..GeometryPatch::default() }
}

/// Label-space corners of the scaled, rotated box: top-left, top-right,
/// bottom-right, bottom-left.
#[must_use]
pub fn corners(geometry: &Geometry) -> [Point; 4] {
    let (hw, hh) = geometry.half_extents();
    [Point::new(-hw, -hh), Point::new(hw, -hh), Point::new(hw, hh), Point::new(-hw, hh)]
        .map(|local| to_world(local, geometry))
}

/// Label-space centers of every handle, for drawing selection chrome.
#[must_use]
pub fn handle_positions(geometry: &Geometry, rotation_handle_offset: f64) -> [(Handle, Point); 9] {
    [
        Handle::Nw,
        Handle::Ne,
        Handle::Sw,
        Handle::Se,
        Handle::N,
        Handle::S,
        Handle::E,
        Handle::W,
        Handle::Rotate,
    ]
    .map(|handle| {
        let local = handle_local_position(handle, geometry, rotation_handle_offset);
        (handle, to_world(local, geometry))
    })
}
