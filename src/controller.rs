//! Generation loop: per-tick scoring plus end-of-generation selection.
//!
//! Every tick each agent pays a small time penalty, senses the normalized
//! offset to the target, moves one unit according to its policy, is sent
//! back to the start if its sprite left the canvas, and earns a bonus that
//! grows as it gets closer to the target. When the generation timer runs
//! out, the highest-reward agent survives, is mutated, and seeds the next
//! population.

use crate::agent::{Action, Agent};
use crate::config::{RepopulationPolicy, SimConfig};
use crate::error::Result;
use crate::random::RandomSource;
use crate::target::Target;
use serde::Serialize;
use tracing::{debug, info};

const HISTORY_CAPACITY: usize = 512;

/// Scores of a generation that just ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub generation: u32,
    pub best_reward: f32,
    pub mean_reward: f32,
    pub population: usize,
    /// Agents whose sprite center sat inside the target circle when time ran out.
    pub on_target: usize,
}

pub struct GenerationController {
    config: SimConfig,
    agents: Vec<Agent>,
    target: Target,
    generation: u32,
    sprite: (f32, f32),
    history: Vec<GenerationSummary>,
}

impl GenerationController {
    /// `sprite` is the on-screen sprite size used for the boundary check.
    pub fn new(config: SimConfig, sprite: (f32, f32), rng: &mut RandomSource) -> Self {
        let agents = (0..config.num_agents).map(|_| Agent::new(&config, rng)).collect();
        let target = Self::place_target(&config, rng);
        Self { config, agents, target, generation: 1, sprite, history: Vec::new() }
    }

    /// Controller over a caller-built population and target.
    pub fn with_population(config: SimConfig, sprite: (f32, f32), agents: Vec<Agent>, target: Target) -> Self {
        Self { config, agents, target, generation: 1, sprite, history: Vec::new() }
    }

    fn place_target(config: &SimConfig, rng: &mut RandomSource) -> Target {
        let (w, h) = config.canvas();
        Target::relocate(w, h, (config.target_radius_min, config.target_radius_max), rng)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut Vec<Agent> {
        &mut self.agents
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Best reward of each finished generation, oldest first.
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    /// Advances one frame. `elapsed` is the time since the current generation
    /// started; a returned summary means a new generation began and the
    /// caller must restart its clock.
    pub fn tick(&mut self, elapsed: f32, rng: &mut RandomSource) -> Result<Option<GenerationSummary>> {
        let summary = if elapsed >= self.config.generation_duration {
            Some(self.reproduce(rng))
        } else {
            None
        };

        let (width, height) = self.config.canvas();
        let target = self.target.pos;
        for agent in self.agents.iter_mut() {
            let mut reward = -self.config.time_penalty;

            let delta = target - agent.pos;
            let distance = agent.pos.distance_to(target);
            let normalized_distance = 1.0 - (distance / width).min(1.0);

            let inputs = [delta.x / width, delta.y / height];
            let actions = agent.policy.predict(&inputs)?;
            if let Some(action) = Action::select(&actions) {
                let (dx, dy) = action.offset();
                agent.pos = agent.pos.offset(dx, dy);
            }

            if !agent.bounds(self.sprite).within(width, height) {
                agent.reward -= self.config.boundary_penalty;
                agent.reset_position(self.config.start);
            }

            reward += normalized_distance;
            agent.reward += reward;
        }

        Ok(summary)
    }

    fn reproduce(&mut self, rng: &mut RandomSource) -> GenerationSummary {
        // Stable sort: among equal rewards the earliest agent stays in front.
        self.agents.sort_by(|a, b| b.reward.total_cmp(&a.reward));

        let population = self.agents.len();
        let mean_reward = if population == 0 {
            0.0
        } else {
            self.agents.iter().map(|a| a.reward).sum::<f32>() / population as f32
        };
        let summary = GenerationSummary {
            generation: self.generation,
            best_reward: self.agents.first().map_or(0.0, |a| a.reward),
            mean_reward,
            population,
            on_target: self
                .agents
                .iter()
                .filter(|a| self.target.contains(a.bounds(self.sprite).center()))
                .count(),
        };

        if let Some(survivor) = self.agents.first().cloned() {
            let offspring = match self.config.repopulation {
                RepopulationPolicy::SingleSurvivor => 1,
                RepopulationPolicy::Refill => self.config.num_agents,
            };
            let next: Vec<Agent> = (0..offspring).map(|_| self.offspring(&survivor, rng)).collect();
            self.agents = next;
        }

        self.target = Self::place_target(&self.config, rng);
        debug!(x = self.target.pos.x, y = self.target.pos.y, radius = self.target.radius, "target relocated");

        info!(
            generation = summary.generation,
            best = summary.best_reward,
            mean = summary.mean_reward,
            population = summary.population,
            on_target = summary.on_target,
            "generation finished"
        );

        self.history.push(summary.clone());
        if self.history.len() > HISTORY_CAPACITY {
            let excess = self.history.len() - HISTORY_CAPACITY;
            self.history.drain(..excess);
        }
        self.generation += 1;
        summary
    }

    fn offspring(&self, survivor: &Agent, rng: &mut RandomSource) -> Agent {
        let mut child = survivor.clone();
        child.policy.mutate_by(self.config.mutation_step, rng);
        child.reward = 0.0;
        child.reset_position(self.config.start);
        child
    }
}
