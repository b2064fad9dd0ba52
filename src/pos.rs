use serde::{Deserialize, Serialize};
use std::ops::Sub;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Pos) -> f32 {
        let d = other - self;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned box, `pos` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub pos: Pos,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn center(&self) -> Pos {
        self.pos.offset(self.width / 2.0, self.height / 2.0)
    }

    pub fn within(&self, width: f32, height: f32) -> bool {
        self.pos.x >= 0.0
            && self.pos.x + self.width <= width
            && self.pos.y >= 0.0
            && self.pos.y + self.height <= height
    }
}
