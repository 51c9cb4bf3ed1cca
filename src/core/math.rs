// Math utilities and helper functions

use glam::Vec2;

/// Axis-aligned rectangle in scene units (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[cfg(test)]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Check that the whole rectangle lies inside `[0, bounds.x] x [0, bounds.y]`
    pub fn is_within(&self, bounds: Vec2) -> bool {
        let max = self.max();
        self.min.x >= 0.0 && self.min.y >= 0.0 && max.x <= bounds.x && max.y <= bounds.y
    }
}

/// Check whether the centre hitboxes of two rectangles overlap.
///
/// Each hitbox is the rectangle shrunk to half its size around its centre, so
/// two rectangles touch when their centres are closer than a quarter of the
/// summed extents on both axes.
pub fn hitboxes_overlap(a: &Rect, b: &Rect) -> bool {
    let delta = (a.center() - b.center()).abs();
    let threshold = (a.size + b.size) / 4.0;
    delta.x < threshold.x && delta.y < threshold.y
}

/// Normalise a movement vector to the given speed, leaving zero vectors untouched
pub fn scale_to_speed(delta: Vec2, speed: f32) -> Vec2 {
    let length = delta.length();
    if length > 0.0 {
        delta / length * speed
    } else {
        delta
    }
}
