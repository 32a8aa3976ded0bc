use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::storage::ModelFile;

/// Fully connected feedforward network trained one example at a time.
///
/// Weights for layer `i` have shape `(layer_counts[i], fan_in(i))`. A network
/// is not internally synchronised; share it across threads only behind the
/// caller's own lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelFile", into = "ModelFile")]
pub struct Network {
    config: NetworkConfig,
    activation: ActivationFunction,
    weights: Vec<Matrix>,
}

impl Network {
    /// Builds a network from explicit weights, checking them against `config`.
    pub fn new(config: NetworkConfig, weights: Vec<Matrix>) -> Result<Network> {
        config.validate()?;
        let activation = config.activation.function()?;

        if weights.len() != config.layer_counts.len() {
            return Err(NetError::ConfigMismatch(format!(
                "{} weight matrices for {} layers",
                weights.len(),
                config.layer_counts.len()
            )));
        }
        for (i, (w, (count, fan_in))) in weights.iter().zip(config.layer_shapes()).enumerate() {
            if count.checked_mul(fan_in) != Some(w.len()) {
                return Err(NetError::ConfigMismatch(format!(
                    "layer {i} has {} weights, expected {count}x{fan_in}",
                    w.len()
                )));
            }
            if w.shape() != (count, fan_in) {
                return Err(NetError::dims("layer weights", w.shape(), (count, fan_in)));
            }
        }

        Ok(Network { config, activation, weights })
    }

    /// Builds a network with weights drawn from the config's random stream.
    ///
    /// Each layer is drawn uniformly from `[-1/√n, 1/√n)` where `n` is the
    /// layer's fan-in. The returned config's `rand_state` points past the
    /// draws consumed here.
    pub fn new_random(mut config: NetworkConfig) -> Result<Network> {
        config.validate()?;

        let mut stream = config.rand().stream();
        let weights = config
            .layer_shapes()
            .map(|(count, fan_in)| stream.fan_in_matrix(count, fan_in, fan_in))
            .collect();
        config.rand_state = stream.position().state;

        Network::new(config, weights)
    }

    /// Forward pass only.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let inputs = self.input_matrix(input)?;
        let outputs = self.forward(&inputs)?;
        match outputs.last() {
            Some(out) => out.to_vector(),
            None => Err(NetError::ConfigMismatch("network has no layers".into())),
        }
    }

    /// One step of online gradient descent on a single example.
    ///
    /// Either every layer's weights are replaced or none are: all new weights
    /// are computed before any are committed.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.train_step(input, target).map(|_| ())
    }

    /// Same as [`Network::train`], returning the prediction made before the
    /// weights were updated.
    pub(crate) fn train_step(&mut self, input: &[f64], target: &[f64]) -> Result<Vec<f64>> {
        let inputs = self.input_matrix(input)?;
        let expected = self.config.output_count();
        if target.len() != expected {
            return Err(NetError::TargetSizeMismatch {
                expected,
                actual: target.len(),
            });
        }
        let targets = Matrix::from_vector(target)?;

        let outputs = self.forward(&inputs)?;
        let errors = self.layer_errors(&targets, &outputs)?;

        let mut adjusted = Vec::with_capacity(self.weights.len());
        for (i, weights) in self.weights.iter().enumerate() {
            let layer_input = if i == 0 { &inputs } else { &outputs[i - 1] };
            let gradient = errors[i].mul_elem(&self.activation.matrix_derivative(&outputs[i])?)?;
            let delta = gradient.dot(&layer_input.transpose())?.scale(self.config.rate);
            adjusted.push(weights.add(&delta)?);
        }

        let prediction = outputs[outputs.len() - 1].to_vector()?;
        self.weights = adjusted;
        self.config.trained += 1;
        Ok(prediction)
    }

    /// Shuffles `items` with the network's own random stream and records the
    /// draws taken, so a saved and reloaded network continues the same order.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut stream = self.config.rand().stream();
        items.shuffle(&mut stream);
        self.config.rand_state = stream.position().state;
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn trained_count(&self) -> u64 {
        self.config.trained
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    fn input_matrix(&self, input: &[f64]) -> Result<Matrix> {
        if input.len() != self.config.input_count {
            return Err(NetError::InputSizeMismatch {
                expected: self.config.input_count,
                actual: input.len(),
            });
        }
        Matrix::from_vector(input)
    }

    /// Activated outputs of every layer, first to last.
    fn forward(&self, inputs: &Matrix) -> Result<Vec<Matrix>> {
        let mut outputs: Vec<Matrix> = Vec::with_capacity(self.weights.len());
        for weights in &self.weights {
            let previous = outputs.last().unwrap_or(inputs);
            let activated = self.activation.apply(&weights.dot(previous)?);
            outputs.push(activated);
        }
        Ok(outputs)
    }

    /// Error signal of every layer: `target - output` at the output layer,
    /// then projected backwards through the transposed weights.
    fn layer_errors(&self, targets: &Matrix, outputs: &[Matrix]) -> Result<Vec<Matrix>> {
        let last = outputs.len() - 1;
        let mut errors = vec![Matrix::default(); outputs.len()];
        errors[last] = targets.sub(&outputs[last])?;
        for i in (0..last).rev() {
            errors[i] = self.weights[i + 1].transpose().dot(&errors[i + 1])?;
        }
        Ok(errors)
    }
}
