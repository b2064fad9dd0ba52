use crate::config::SimConfig;
use crate::policy::LinearPolicy;
use crate::pos::{Pos, Rect};
use crate::random::RandomSource;

/// Inputs: normalized dx and dy to the target.
pub const NUM_INPUTS: usize = 2;
/// Outputs: one score per [`Action`].
pub const NUM_OUTPUTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    pub const ALL: [Action; NUM_OUTPUTS] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Unit step in screen space (y grows downward).
    pub fn offset(self) -> (f32, f32) {
        match self {
            Action::Up => (0.0, -1.0),
            Action::Down => (0.0, 1.0),
            Action::Left => (-1.0, 0.0),
            Action::Right => (1.0, 0.0),
        }
    }

    /// First action, in Up/Down/Left/Right order, whose score equals the
    /// maximum. Ties therefore always resolve to the earliest index.
    /// `None` when no score compares equal to the maximum (all NaN).
    pub fn select(outputs: &[f32]) -> Option<Action> {
        let max = outputs.iter().copied().reduce(|m, v| if v > m { v } else { m })?;
        Self::ALL
            .iter()
            .zip(outputs)
            .find(|&(_, &v)| v == max)
            .map(|(&a, _)| a)
    }
}

#[derive(Clone, Debug)]
pub struct Agent {
    /// Top-left corner of the sprite.
    pub pos: Pos,
    pub policy: LinearPolicy,
    pub reward: f32,
}

impl Agent {
    pub fn new(config: &SimConfig, rng: &mut RandomSource) -> Self {
        Self::with_policy(
            LinearPolicy::new(NUM_INPUTS, NUM_OUTPUTS, config.init_weight_range, rng),
            config.start,
        )
    }

    pub fn with_policy(policy: LinearPolicy, start: Pos) -> Self {
        Self { pos: start, policy, reward: 0.0 }
    }

    pub fn reset_position(&mut self, start: Pos) {
        self.pos = start;
    }

    pub fn bounds(&self, sprite: (f32, f32)) -> Rect {
        Rect { pos: self.pos, width: sprite.0, height: sprite.1 }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tie_resolves_to_first_index() {
        assert_eq!(Action::select(&[0.5, 0.5, 0.2, 0.1]), Some(Action::Up));
        assert_eq!(Action::select(&[0.1, 0.7, 0.7, 0.7]), Some(Action::Down));
    }

    #[test]
    fn unique_max_wins() {
        assert_eq!(Action::select(&[-1.0, -2.0, -0.5, -3.0]), Some(Action::Left));
        assert_eq!(Action::select(&[0.0, 0.0, 0.0, 0.1]), Some(Action::Right));
    }

    #[test]
    fn no_move_without_comparable_max() {
        assert_eq!(Action::select(&[]), None);
        assert_eq!(Action::select(&[f32::NAN; 4]), None);
    }

    #[test]
    fn reset_position_keeps_reward() {
        let mut rng = RandomSource::seeded(2);
        let config = SimConfig::default();
        let mut agent = Agent::new(&config, &mut rng);
        agent.pos = Pos::new(1.0, 2.0);
        agent.reward = 4.5;
        agent.reset_position(config.start);
        assert_eq!(agent.pos, Pos::new(400.0, 500.0));
        assert_eq!(agent.reward, 4.5);
    }
}
