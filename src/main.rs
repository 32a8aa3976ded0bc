//! backprop-net
//!
//! Trains a small network on the XOR truth table, resuming from a saved model
//! when one exists, and writes the model back afterwards.
//!
//! Run with:
//!   cargo run --bin backprop-net -- [run-config.json]
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-epoch output.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use backprop_net::{
    evaluate, load_from_path, save_to_path, train_loop, NetError, Network, NetworkConfig,
    TrainConfig,
};
use log::{debug, error, info};
use serde::Deserialize;

/// Settings for one run. Every field falls back to its default when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RunConfig {
    model_path: PathBuf,
    epochs: usize,
    shuffle: bool,
    /// Log a progress line every this many epochs.
    log_every: usize,
    network: NetworkConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            model_path: PathBuf::from("models/xor.model.json"),
            epochs: 5000,
            shuffle: true,
            log_every: 500,
            network: NetworkConfig::new(2, vec![3, 1]).with_rate(0.5),
        }
    }
}

fn read_run_config(path: &Path) -> Result<RunConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("parsing {}: {e}", path.display()))
}

fn xor_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

fn load_or_create(cfg: &RunConfig) -> Result<Network, NetError> {
    match load_from_path(&cfg.model_path) {
        Ok(network) => {
            info!(
                "loaded model from {}, trained on {} examples",
                cfg.model_path.display(),
                network.trained_count()
            );
            Ok(network)
        }
        Err(NetError::NotFound(_)) => {
            info!(
                "no model at {}, creating a new network seeded with {}",
                cfg.model_path.display(),
                cfg.network.rand_seed
            );
            Network::new_random(cfg.network.clone())
        }
        Err(e) => Err(e),
    }
}

fn run(cfg: RunConfig) -> Result<(), NetError> {
    let mut network = load_or_create(&cfg)?;
    let (inputs, targets) = xor_dataset();

    info!("training {} epochs", cfg.epochs);
    let history = train_loop(
        &mut network,
        &inputs,
        &targets,
        &TrainConfig::new(cfg.epochs, cfg.shuffle),
    )?;
    for stats in &history {
        if cfg.log_every > 0 && stats.epoch % cfg.log_every == 0 {
            info!("epoch {}/{}: loss = {:.6}", stats.epoch, stats.total_epochs, stats.train_loss);
        } else {
            debug!("epoch {}: loss = {:.6} ({} ms)", stats.epoch, stats.train_loss, stats.elapsed_ms);
        }
    }

    for input in &inputs {
        info!("{:?} -> {:.4?}", input, network.predict(input)?);
    }
    let eval = evaluate(&network, &inputs, &targets)?;
    info!(
        "scored {}/{} ({:.2}%), mean loss {:.6}",
        eval.correct,
        eval.total,
        eval.accuracy() * 100.0,
        eval.mean_loss
    );

    save_to_path(&network, &cfg.model_path)?;
    info!(
        "saved model to {} after {} examples",
        cfg.model_path.display(),
        network.trained_count()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args_os().nth(1) {
        Some(path) => match read_run_config(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("run config error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RunConfig::default(),
    };

    match run(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
