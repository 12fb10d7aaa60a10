// vehicles_sim/src/simulation/core/prng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The deterministic pseudo-random number generator for a simulation run.
///
/// Every agent draws from its own ChaCha stream of the same seed, so adding an
/// agent to a scenario never changes the noise another agent sees.
#[derive(Debug, Clone)]
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// The generator for agent number `index`.
    pub fn for_agent(&self, index: usize) -> ChaCha8Rng {
        let mut rng = self.0.clone();
        rng.set_stream(index as u64);
        rng
    }
}
