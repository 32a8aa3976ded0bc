//! Multilayer feedforward network trained by online backpropagation.
//!
//! A [`Network`] is built from a [`NetworkConfig`] either with seeded random
//! weights ([`Network::new_random`]) or explicit ones ([`Network::new`]), then
//! trained one example at a time with [`Network::train`] and queried with
//! [`Network::predict`]. Models persist as versioned JSON documents through
//! [`save_to_path`] / [`load_from_path`].

pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::{ActivationFunction, ActivationType};
pub use network::config::NetworkConfig;
pub use network::network::Network;
pub use network::rng::{Rand, RandStream};
pub use network::storage::{from_bytes, load_from_path, save_to_path, to_bytes};
pub use loss::mse::MseLoss;
pub use train::{evaluate, train_epoch, train_loop, EpochStats, Evaluation, TrainConfig};
