use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{check_dataset, train_epoch};

/// Trains `network` for up to `config.epochs` epochs and returns the stats of
/// every completed epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// A training error aborts the run; epochs already completed stay applied to
/// the network.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    check_dataset(inputs, targets)?;

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        let train_loss = train_epoch(network, inputs, targets, config.shuffle)?;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            trained: network.trained_count(),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(history)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}
