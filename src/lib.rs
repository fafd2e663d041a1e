//! Affine quantization of real-valued arrays to fixed-width signed integers.
//!
//! A value `x` is mapped to the code `round(a*x + b)` and recovered as
//! `(q - b)/a`, where the scale `a` and the integer zero-point `b` are derived
//! from the range of the array being quantized.

pub mod arrays;
pub mod error;
pub mod quantization;

pub use error::{QuantizationError, Result};
pub use quantization::{
    quantize, AffineQuantizer, QuantizationRange, Quantized, QuantizerConfig, RoundingPolicy,
};
