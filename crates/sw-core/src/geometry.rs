//! Coordinate mapping between detector space and canvas space.
//!
//! Landmarks arrive normalized to `[0, 1]` on both axes, already rotated
//! upright and mirrored by the frame producer. Mapping is a plain scale by
//! the canvas size; there is no orientation logic here.

use serde::{Deserialize, Serialize};

/// A canvas-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Map `self` through a uniform scale about `center`.
    pub fn scaled_about(self, center: Point, factor: f32) -> Point {
        Point::new(
            center.x + (self.x - center.x) * factor,
            center.y + (self.y - center.y) * factor,
        )
    }
}

/// A detector-space coordinate, nominally in `[0, 1]`.
///
/// Out-of-range values are accepted and simply map off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: NormalizedPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Render-surface dimensions in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A canvas that has not been measured yet (or is degenerate).
    /// Mapping and hit testing are meaningless against it.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Map a normalized landmark onto the canvas.
pub fn to_canvas(landmark: NormalizedPoint, canvas: CanvasSize) -> Point {
    Point::new(landmark.x * canvas.width, landmark.y * canvas.height)
}
