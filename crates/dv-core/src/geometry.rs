//! Canvas geometry: dimensions, element footprint, and boundary clamping.
//!
//! Every element is clamped with the same nominal footprint regardless of
//! its rendered size. Header text or a long footer can therefore overhang
//! the right edge slightly; that matches what users see in the preview.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// The canvas dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Nominal element size used for clamping and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
        }
    }
}

impl Footprint {
    /// The footprint rectangle anchored at `origin` (the element's top-left).
    pub fn rect_at(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, Size::new(self.width, self.height))
    }
}

/// Clamp one axis to `[0, limit]`. When `limit` is negative (canvas smaller
/// than the footprint) the result is 0, never negative.
#[inline]
fn clamp_axis(value: f64, limit: f64) -> f64 {
    // Not `f64::clamp`: it panics when min > max.
    value.min(limit).max(0.0)
}

/// Clamp a candidate top-left position so the footprint stays on the canvas.
pub fn clamp_position(candidate: Point, canvas: CanvasSize, footprint: Footprint) -> Point {
    Point::new(
        clamp_axis(candidate.x, canvas.width - footprint.width),
        clamp_axis(candidate.y, canvas.height - footprint.height),
    )
}
