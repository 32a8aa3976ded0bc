use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationType;
use crate::error::{NetError, Result};
use crate::network::rng::Rand;

/// Learning rate used by [`NetworkConfig::new`].
pub const DEFAULT_RATE: f64 = 0.1;

/// Everything needed to rebuild a network besides its weights.
///
/// Fields:
/// - `input_count`: number of values in each input vector
/// - `layer_counts`: neurons per layer, hidden layers first, output layer last
/// - `activation`: activation applied after every layer
/// - `rate`: learning rate, applied identically to every layer
/// - `rand_seed`: seed of the network's pseudo-random stream
/// - `rand_state`: draws already consumed from that stream
/// - `trained`: number of examples the network has been trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_count: usize,
    pub layer_counts: Vec<usize>,
    #[serde(default)]
    pub activation: ActivationType,
    pub rate: f64,
    #[serde(default)]
    pub rand_seed: u64,
    #[serde(default)]
    pub rand_state: u64,
    #[serde(default)]
    pub trained: u64,
}

impl NetworkConfig {
    /// Sigmoid network with the default learning rate and seed `0`.
    pub fn new(input_count: usize, layer_counts: Vec<usize>) -> NetworkConfig {
        NetworkConfig {
            input_count,
            layer_counts,
            activation: ActivationType::Sigmoid,
            rate: DEFAULT_RATE,
            rand_seed: 0,
            rand_state: 0,
            trained: 0,
        }
    }

    pub fn with_activation(mut self, activation: ActivationType) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rand_seed = seed;
        self
    }

    /// Size of the last layer, or `0` when no layers are configured.
    pub fn output_count(&self) -> usize {
        self.layer_counts.last().copied().unwrap_or(0)
    }

    /// Number of values feeding layer `index`, or `None` past the last layer.
    pub fn fan_in(&self, index: usize) -> Option<usize> {
        if index >= self.layer_counts.len() {
            return None;
        }
        match index {
            0 => Some(self.input_count),
            i => Some(self.layer_counts[i - 1]),
        }
    }

    /// Weight shape `(neurons, fan_in)` of every layer, first to last.
    pub fn layer_shapes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let fan_ins = std::iter::once(self.input_count).chain(self.layer_counts.iter().copied());
        self.layer_counts.iter().copied().zip(fan_ins)
    }

    /// Current position of the network's random stream.
    pub fn rand(&self) -> Rand {
        Rand::new(self.rand_seed, self.rand_state)
    }

    /// Checks the topology and learning rate. The activation identifier is
    /// resolved separately when the network is built.
    pub fn validate(&self) -> Result<()> {
        if self.input_count == 0 {
            return Err(NetError::ConfigMismatch("input count must be at least 1".into()));
        }
        if self.layer_counts.is_empty() {
            return Err(NetError::ConfigMismatch("at least one layer is required".into()));
        }
        if let Some(i) = self.layer_counts.iter().position(|&n| n == 0) {
            return Err(NetError::ConfigMismatch(format!("layer {i} has no neurons")));
        }
        if let Some((i, (count, fan_in))) = self
            .layer_shapes()
            .enumerate()
            .find(|(_, (count, fan_in))| count.checked_mul(*fan_in).is_none())
        {
            return Err(NetError::ConfigMismatch(format!(
                "layer {i} is too large: {count}x{fan_in} weights"
            )));
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(NetError::ConfigMismatch(format!(
                "learning rate must be positive, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}
