use crate::error::{NetError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;

/// Trains `network` once on every example and returns the mean MSE of the
/// predictions made before each update.
///
/// With `shuffle` set, the visiting order comes from the network's own random
/// stream, so a network saved between epochs and reloaded keeps the order it
/// would have had if it had never stopped.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    shuffle: bool,
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut order: Vec<usize> = (0..inputs.len()).collect();
    if shuffle {
        network.shuffle(&mut order);
    }

    let mut total_loss = 0.0;
    for idx in order {
        let output = network.train_step(&inputs[idx], &targets[idx])?;
        total_loss += MseLoss::loss(&output, &targets[idx]);
    }

    Ok(total_loss / inputs.len() as f64)
}

pub(crate) fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.len() != targets.len() {
        return Err(NetError::ConfigMismatch(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    if inputs.is_empty() {
        return Err(NetError::EmptyInput);
    }
    Ok(())
}
