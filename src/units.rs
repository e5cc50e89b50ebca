//! Coordinate spaces: label-space points, device-pixel points, and the
//! viewport that converts between them.
//!
//! Every geometry and state-machine function in this crate works in label
//! units. Device pixels only exist at the host boundary, as [`DevicePoint`],
//! and the only way to turn one into a [`Point`] is [`Viewport::device_to_label`].
//! Keeping the two as distinct types means a device-pixel coordinate cannot be
//! passed into the engine by accident.

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point (or delta) in label space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate this vector by `degrees` (clockwise in a y-down frame).
    #[must_use]
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A point in device (canvas backing-store) pixels, as delivered by pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of the label on the drawing surface.
///
/// `offset_x` / `offset_y` are the device-pixel position of the label origin.
/// `scale` is device pixels per label unit (1.0 = one pixel per unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Viewport {
    /// Viewport with no offset and the given display scale.
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    /// Convert a device-pixel point to label space.
    #[must_use]
    pub fn device_to_label(&self, device: DevicePoint) -> Point {
        Point {
            x: (device.x - self.offset_x) / self.scale,
            y: (device.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a label-space point to device pixels.
    #[must_use]
    pub fn label_to_device(&self, label: Point) -> DevicePoint {
        DevicePoint {
            x: label.x * self.scale + self.offset_x,
            y: label.y * self.scale + self.offset_y,
        }
    }

    /// Convert a device-pixel distance to a label-space distance.
    #[must_use]
    pub fn device_dist_to_label(&self, device_dist: f64) -> f64 {
        device_dist / self.scale
    }
}
