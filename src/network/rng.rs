use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// A restorable position in a seeded pseudo-random stream.
///
/// `state` counts the 64-bit draws already taken from the stream seeded by
/// `seed`, so two `Rand` values with the same fields always yield the same
/// subsequent draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rand {
    pub seed: u64,
    pub state: u64,
}

impl Rand {
    pub fn new(seed: u64, state: u64) -> Rand {
        Rand { seed, state }
    }

    /// A generator seeded with `seed` and advanced past `state` draws.
    pub fn stream(&self) -> RandStream {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        // Each draw is one u64, i.e. two 32-bit ChaCha words.
        rng.set_word_pos(u128::from(self.state) * 2);
        RandStream { rng, position: *self }
    }
}

/// Generator handed out by [`Rand::stream`]. Counts its draws so the caller
/// can persist where it stopped.
#[derive(Debug, Clone)]
pub struct RandStream {
    rng: ChaCha8Rng,
    position: Rand,
}

impl RandStream {
    /// The `Rand` that would recreate this stream at its current point.
    pub fn position(&self) -> Rand {
        self.position
    }

    /// `rows x cols` values drawn uniformly from `[-1/√fan_in, 1/√fan_in)`,
    /// filled row-major.
    pub fn fan_in_matrix(&mut self, rows: usize, cols: usize, fan_in: usize) -> Matrix {
        let bound = 1.0 / (fan_in as f64).sqrt();
        Matrix::from_fn(rows, cols, |_, _| self.gen::<f64>() * 2.0 * bound - bound)
    }
}

impl RngCore for RandStream {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.position.state = self.position.state.wrapping_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_chacha::rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
