pub mod barrier;
pub mod barrier_set;
pub mod body;
pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod geometry;
pub mod integrator;
pub mod interaction;
pub mod manager;
pub mod resolver;
pub mod timestep;
pub mod world;

pub use barrier::Barrier;
pub use barrier_set::{BarrierId, BarrierLinks, BarrierSet};
pub use body::{Body, BodyId, Bonds, Forces, Health, Phase, SurfaceContact};
pub use codec::{BodySnapshot, CodecError};
pub use config::{ConfigError, IntegratorConfig, InteractionConfig, ResolverConfig, SimulationConfig};
pub use diagnostics::ResolverStats;
pub use interaction::InteractionEngine;
pub use manager::BodyManager;
pub use resolver::{BarrierResolver, Correction, ResolveReport};
pub use timestep::{FixedStepAccumulator, FIXED_STEP};
pub use world::World;

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
