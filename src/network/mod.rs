pub mod config;
pub mod network;
pub mod rng;
pub mod storage;

pub use config::NetworkConfig;
pub use network::Network;
pub use rng::{Rand, RandStream};
pub use storage::{from_bytes, load_from_path, save_to_path, to_bytes, ModelFile, MODEL_VERSION};
