//! Deterministic simulation RNG resource.
//!
//! Wraps `ChaCha8Rng` so that a run replays identically for a given seed.
//! Every system that needs randomness (lane types, traffic intervals, start
//! tile, music pick) takes `ResMut<SimRng>` instead of `rand::thread_rng()`.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic RNG resource for all simulation randomness.
///
/// Systems use `rng.0` directly (a `ChaCha8Rng` implementing `rand::Rng`).
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Draw a fresh seed for a child generator (used for per-lane decoration).
    pub fn fork_seed(&mut self) -> u64 {
        self.0.gen()
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        // A host that inserted its own seeded RNG keeps it.
        app.init_resource::<SimRng>();
    }
}
