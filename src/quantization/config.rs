use std::fmt;

use rand::RngCore;

use crate::error::{QuantizationError, Result};

pub const DEFAULT_NBITS: u32 = 8;

/// Range and scale selection for a quantization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizerConfig {
    /// Width of the signed integer codes.
    pub nbits: u32,
    /// Restrict the scale to a power of two so dequantization is a shift.
    pub block_exponent: bool,
    /// Center the range on zero, forcing a zero-point of 0.
    pub symmetric: bool,
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            nbits: DEFAULT_NBITS,
            block_exponent: false,
            symmetric: false,
        }
    }
}

impl QuantizerConfig {
    pub fn with_nbits(mut self, nbits: u32) -> Self {
        self.nbits = nbits;
        self
    }

    pub fn with_block_exponent(mut self, block_exponent: bool) -> Self {
        self.block_exponent = block_exponent;
        self
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Codes are `i32` and the deterministic boundary shift needs an even
    /// upper saturation code, which rules out a single bit.
    pub fn validate(&self) -> Result<()> {
        if (2..=31).contains(&self.nbits) {
            Ok(())
        } else {
            Err(QuantizationError::UnsupportedBitWidth(self.nbits))
        }
    }

    /// Number of representable steps across the range, `2^nbits - 1`.
    pub(crate) fn levels(&self) -> f64 {
        ((1_u64 << self.nbits) - 1) as f64
    }
}

/// How the scaled value `a*x + b` is turned into an integer code.
pub enum RoundingPolicy<'a> {
    /// `round_half_even(a*x + b + 1) - 1`. Reproducible, error at most half a code.
    Deterministic,
    /// `round_half_even(a*x + b + u - 0.5)` with `u` uniform in `[0, 1)`,
    /// drawn per element. Unbiased in expectation.
    Stochastic(&'a mut dyn RngCore),
}

impl RoundingPolicy<'_> {
    pub fn is_stochastic(&self) -> bool {
        matches!(self, RoundingPolicy::Stochastic(_))
    }
}

impl fmt::Debug for RoundingPolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Deterministic => f.write_str("Deterministic"),
            RoundingPolicy::Stochastic(_) => f.write_str("Stochastic"),
        }
    }
}
