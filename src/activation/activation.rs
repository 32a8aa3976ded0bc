use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Activation identifier as stored in a [`NetworkConfig`](crate::NetworkConfig).
///
/// `LeakyReLU` is a reserved identifier: it round-trips through config files
/// but has no strategy behind it, so building a network with it fails with
/// [`NetError::UnknownActivation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationType {
    #[default]
    #[serde(rename = "sigmoid")]
    Sigmoid,
    #[serde(rename = "tanh")]
    Tanh,
    #[serde(rename = "leaky_relu")]
    LeakyReLU,
}

impl ActivationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationType::Sigmoid => "sigmoid",
            ActivationType::Tanh => "tanh",
            ActivationType::LeakyReLU => "leaky_relu",
        }
    }

    /// Resolves the identifier to the strategy that implements it.
    pub fn function(&self) -> Result<ActivationFunction> {
        match self {
            ActivationType::Sigmoid => Ok(ActivationFunction::Sigmoid),
            ActivationType::Tanh => Ok(ActivationFunction::Tanh),
            ActivationType::LeakyReLU => Err(NetError::UnknownActivation(self.to_string())),
        }
    }
}

impl fmt::Display for ActivationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationType {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationType::Sigmoid),
            "tanh" => Ok(ActivationType::Tanh),
            "leaky_relu" => Ok(ActivationType::LeakyReLU),
            _ => Err(NetError::UnknownActivation(s.to_string())),
        }
    }
}

/// An activation strategy: a scalar transform plus its derivative expressed
/// over the already-activated outputs of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    Sigmoid,
    Tanh,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn value(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    /// Derivative of the activation, given `outputs = value(z)` rather than `z`.
    ///
    /// - Sigmoid: `outputs ⊙ (1 - outputs)`
    /// - Tanh:    `1 - outputs²`
    pub fn matrix_derivative(&self, outputs: &Matrix) -> Result<Matrix> {
        let ones = Matrix::filled(outputs.rows(), outputs.cols(), 1.0);
        match self {
            ActivationFunction::Sigmoid => outputs.mul_elem(&ones.sub(outputs)?),
            ActivationFunction::Tanh => ones.sub(&outputs.map(|v| v * v)),
        }
    }

    /// Applies [`ActivationFunction::value`] to every element.
    pub fn apply(&self, m: &Matrix) -> Matrix {
        m.map(|x| self.value(x))
    }
}

impl TryFrom<ActivationType> for ActivationFunction {
    type Error = NetError;

    fn try_from(kind: ActivationType) -> Result<Self> {
        kind.function()
    }
}
