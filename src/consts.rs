//! Shared numeric constants for the label engine.

// ── Size ────────────────────────────────────────────────────────

/// Smallest width or height any element may be resized to, in label units.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Extra horizontal tap target around text elements, in label units.
pub const TEXT_HIT_PAD_X: f64 = 20.0;

/// Extra vertical tap target around text elements, in label units.
pub const TEXT_HIT_PAD_Y: f64 = 10.0;

/// Default hit radius for resize and rotate handles, in label units.
pub const DEFAULT_HANDLE_SIZE: f64 = 8.0;

/// Default distance from the top edge to the rotate handle, in label units.
pub const DEFAULT_ROTATION_HANDLE_OFFSET: f64 = 24.0;

// ── Rotation ────────────────────────────────────────────────────

/// Rotations closer to zero than this (degrees) are resized axis-aligned.
pub const AXIS_ALIGNED_EPSILON_DEG: f64 = 0.01;

/// Angle between the zero-rotation "up" reference and `atan2`'s +X axis.
pub const ROTATION_REFERENCE_DEG: f64 = 90.0;
