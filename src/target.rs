use crate::pos::Pos;
use crate::random::RandomSource;

/// Circular goal the agents are scored against. `pos` is the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub pos: Pos,
    pub radius: f32,
    pub color: [u8; 3],
}

impl Target {
    /// New random target that lies fully inside a `width` x `height` canvas.
    pub fn relocate(width: f32, height: f32, radius_range: (f32, f32), rng: &mut RandomSource) -> Self {
        let radius = rng.uniform(radius_range.0, radius_range.1);
        let x = rng.uniform(radius, width - radius);
        let y = rng.uniform(radius, height - radius);
        Self { pos: Pos::new(x, y), radius, color: rng.color() }
    }

    pub fn contains(&self, p: Pos) -> bool {
        self.pos.distance_to(p) <= self.radius
    }
}
