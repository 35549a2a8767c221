use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::RemoteTarget;

pub const TILE_COUNT: usize = 4;

const COORDINATE_MIN: u32 = 10_000_000;
const COORDINATE_MAX: u32 = 99_999_999;

/// Random source for trial targets and remote-viewing assignments.
pub struct TrialGenerator {
    rng: StdRng,
}

impl TrialGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, used by `--seed` and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick_target_index(&mut self) -> usize {
        self.rng.gen_range(0..TILE_COUNT)
    }

    pub fn pick_remote_target(&mut self, catalog: &'static [RemoteTarget]) -> &'static RemoteTarget {
        // The target catalog is a non-empty static table.
        catalog
            .choose(&mut self.rng)
            .unwrap_or(&catalog[0])
    }

    /// Eight decimal digits, never with a leading zero.
    pub fn generate_coordinate(&mut self) -> String {
        self.rng
            .gen_range(COORDINATE_MIN..=COORDINATE_MAX)
            .to_string()
    }
}

impl Default for TrialGenerator {
    fn default() -> Self {
        Self::new()
    }
}
