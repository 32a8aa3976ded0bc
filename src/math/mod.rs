pub mod codec;
pub mod matrix;

pub use matrix::Matrix;
