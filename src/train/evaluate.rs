use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::trainer::check_dataset;

/// Result of running a labelled dataset through a network without training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Examples whose strongest output matched the strongest target.
    pub correct: usize,
    pub total: usize,
    /// Mean MSE over all examples.
    pub mean_loss: f64,
}

impl Evaluation {
    /// Fraction of correct examples in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Scores `network` on a dataset by argmax match and mean MSE.
pub fn evaluate(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Evaluation> {
    check_dataset(inputs, targets)?;

    let mut correct = 0;
    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.predict(input)?;
        total_loss += MseLoss::loss(&output, target);
        if argmax(&output) == argmax(target) {
            correct += 1;
        }
    }

    Ok(Evaluation {
        correct,
        total: inputs.len(),
        mean_loss: total_loss / inputs.len() as f64,
    })
}

/// Index of the maximum element in a slice; ties go to the first.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &x)| {
            if x > best { (i, x) } else { (best_i, best) }
        })
        .0
}
