//! Agents steered by tiny linear policies learn to drive toward a randomly
//! placed target. Every generation the best agent survives, is mutated and
//! seeds the next population.

pub mod agent;
pub mod assets;
pub mod config;
pub mod controller;
pub mod error;
pub mod policy;
pub mod pos;
pub mod random;
pub mod render;
pub mod target;

pub use agent::{Action, Agent};
pub use config::{RepopulationPolicy, SimConfig};
pub use controller::{GenerationController, GenerationSummary};
pub use error::{Result, SimError};
pub use policy::LinearPolicy;
pub use pos::Pos;
pub use random::RandomSource;
pub use target::Target;
