//! Linear policy mapping sensor inputs to action scores.

use crate::error::{Result, SimError};
use crate::random::RandomSource;

/// Default perturbation bound used by [`LinearPolicy::mutate`].
pub const MUTATION_STEP: f32 = 0.1;

/// Weight matrix stored row-major: row `i` holds the weights feeding output `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearPolicy {
    num_inputs: usize,
    num_outputs: usize,
    weights: Vec<f32>,
}

impl LinearPolicy {
    /// Fresh policy with every weight drawn from `[-init_range, init_range)`.
    pub fn new(num_inputs: usize, num_outputs: usize, init_range: f32, rng: &mut RandomSource) -> Self {
        let weights = (0..num_inputs * num_outputs)
            .map(|_| rng.uniform(-init_range, init_range))
            .collect();
        Self { num_inputs, num_outputs, weights }
    }

    pub fn from_weights(num_inputs: usize, num_outputs: usize, weights: Vec<f32>) -> Result<Self> {
        let expected = num_inputs * num_outputs;
        if weights.len() != expected {
            return Err(SimError::InvalidArgument { expected, actual: weights.len() });
        }
        Ok(Self { num_inputs, num_outputs, weights })
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// `None` when either index is outside the matrix shape.
    pub fn weight(&self, output: usize, input: usize) -> Option<f32> {
        if output >= self.num_outputs || input >= self.num_inputs {
            return None;
        }
        self.weights.get(output * self.num_inputs + input).copied()
    }

    pub fn mutate(&mut self, rng: &mut RandomSource) {
        self.mutate_by(MUTATION_STEP, rng);
    }

    /// Nudges every weight by a value in `[-step, step)`. The shape never changes.
    pub fn mutate_by(&mut self, step: f32, rng: &mut RandomSource) {
        for w in self.weights.iter_mut() {
            *w += rng.uniform(-step, step);
        }
    }

    pub fn predict(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        if inputs.len() != self.num_inputs {
            return Err(SimError::InvalidArgument { expected: self.num_inputs, actual: inputs.len() });
        }
        if self.num_inputs == 0 {
            return Ok(vec![0.0; self.num_outputs]);
        }
        let outputs = self
            .weights
            .chunks_exact(self.num_inputs)
            .map(|row| row.iter().zip(inputs).map(|(w, x)| w * x).sum())
            .collect();
        Ok(outputs)
    }
}
