//! # Geometry Helpers
//!
//! Minimal 2D plan geometry: points in meters, Euclidean distance, grid
//! snapping, and wall segments as produced by a drawing surface. This is
//! deliberately simple length/distance math - no collision detection or
//! geometric validation happens here.

use serde::{Deserialize, Serialize};

/// A 2D point on the plan, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qsc_core::geometry::Point;
    ///
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(3.0, 4.0);
    /// assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    /// ```
    pub fn distance_to(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Snap both coordinates to the nearest multiple of `grid_m`.
    pub fn snap_to_grid(self, grid_m: f64) -> Point {
        Point {
            x: (self.x / grid_m).round() * grid_m,
            y: (self.y / grid_m).round() * grid_m,
        }
    }
}

/// Wall classification as drawn on the plan.
///
/// External and internal walls carry different finished thicknesses in the
/// built-in templates (0.20 m vs 0.15 m).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    ExternalWall,
    InternalWall,
}

/// A wall segment produced by the drawing surface: two endpoints in plan
/// coordinates plus a thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Point,
    pub end: Point,
    /// Wall thickness in meters
    pub thickness_m: f64,
    pub kind: WallKind,
}

impl WallSegment {
    /// Centerline length of the wall in meters.
    pub fn length_m(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}
