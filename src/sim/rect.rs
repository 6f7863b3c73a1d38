//! Axis-aligned rectangle geometry for the paddle, bricks, pickups and laser shots
//!
//! Screen convention: origin at the top-left corner of the playfield, `y` grows
//! downward. A rectangle is stored as its top-left corner plus its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in playfield space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width (x) and height (y)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Build a rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict containment of `x` in the open horizontal span
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }

    /// Strict containment of a point (edges excluded)
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.spans_x(point.x) && point.y > self.top() && point.y < self.bottom()
    }
}
