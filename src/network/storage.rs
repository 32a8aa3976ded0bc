use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::network::Network;

/// Layout version written by this crate. Readers reject anything else.
pub const MODEL_VERSION: u32 = 1;

/// On-disk document: the config as plain fields and every weight matrix as a
/// base64 string of its binary encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub version: u32,
    pub config: NetworkConfig,
    pub layers: Vec<EncodedMatrix>,
}

/// A matrix that serializes as base64 text of [`Matrix::to_bytes`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMatrix(pub Matrix);

impl Serialize for EncodedMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(self.0.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for EncodedMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(text.as_bytes())
            .map_err(|e| de::Error::custom(format!("base64 decoding: {e}")))?;
        Matrix::from_bytes(&bytes)
            .map(EncodedMatrix)
            .map_err(de::Error::custom)
    }
}

impl From<Network> for ModelFile {
    fn from(network: Network) -> Self {
        ModelFile::from(&network)
    }
}

impl From<&Network> for ModelFile {
    fn from(network: &Network) -> Self {
        ModelFile {
            version: MODEL_VERSION,
            config: network.config().clone(),
            layers: network.weights().iter().cloned().map(EncodedMatrix).collect(),
        }
    }
}

impl TryFrom<ModelFile> for Network {
    type Error = NetError;

    fn try_from(file: ModelFile) -> Result<Network> {
        if file.version != MODEL_VERSION {
            return Err(NetError::Decode(format!(
                "unsupported model version {}, expected {MODEL_VERSION}",
                file.version
            )));
        }
        let weights = file.layers.into_iter().map(|m| m.0).collect();
        Network::new(file.config, weights)
    }
}

/// Serializes a network to its JSON model document.
pub fn to_bytes(network: &Network) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(&ModelFile::from(network)).map_err(|e| NetError::Encode(e.to_string()))
}

/// Rebuilds a network from bytes written by [`to_bytes`], validating the
/// weights exactly as [`Network::new`] does.
pub fn from_bytes(bytes: &[u8]) -> Result<Network> {
    let file: ModelFile =
        serde_json::from_slice(bytes).map_err(|e| NetError::Decode(e.to_string()))?;
    Network::try_from(file)
}

/// Writes the model document to `path`, creating parent directories first.
pub fn save_to_path(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| NetError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &ModelFile::from(network)).map_err(|e| {
        if e.is_io() {
            io_err(e.into())
        } else {
            NetError::Encode(e.to_string())
        }
    })?;
    writer.flush().map_err(io_err)
}

/// Reads a model document written by [`save_to_path`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => NetError::NotFound(path.to_path_buf()),
        _ => NetError::Io { path: path.to_path_buf(), source },
    })?;
    let reader = BufReader::new(file);
    let model: ModelFile = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            NetError::Io { path: path.to_path_buf(), source: e.into() }
        } else {
            NetError::Decode(e.to_string())
        }
    })?;
    Network::try_from(model)
}

impl Network {
    /// Convenience wrapper around [`save_to_path`].
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        save_to_path(self, path)
    }

    /// Convenience wrapper around [`load_from_path`].
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        load_from_path(path)
    }
}
