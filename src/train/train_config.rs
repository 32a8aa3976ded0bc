use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`: total number of full passes over the training data
/// - `shuffle`: visit examples in an order drawn from the network's
///   random stream instead of dataset order
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///   completed epoch.  If the receiver is dropped the loop
///   terminates early.
/// - `stop_flag`: optional atomic flag; when set to `true` from another
///   thread the loop terminates after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, shuffle: bool) -> Self {
        TrainConfig {
            epochs,
            shuffle,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
