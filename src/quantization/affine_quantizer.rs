use rand::Rng;

use super::config::{QuantizerConfig, RoundingPolicy};
use super::range::QuantizationRange;
use crate::error::{QuantizationError, Result};

/// Largest zero point magnitude that still leaves 8 fractional bits of a code
/// in the 53-bit mantissa of `scale * x + zero`.
const MAX_ZERO_POINT: f64 = (1_u64 << 45) as f64;

/// Signed `nbits` quantization scheme: `q = round(scale * x + zero)`,
/// `x ~ (q - zero) / scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineQuantizer {
    pub scale: f64,
    pub zero: i64,
    pub nbits: u32,
}

impl AffineQuantizer {
    pub fn new(range: QuantizationRange, config: &QuantizerConfig) -> Result<Self> {
        config.validate()?;

        let mut scale = config.levels() / range.width();
        if !(scale.is_finite() && scale > 0.0) {
            return Err(QuantizationError::DegenerateRange {
                min: range.min,
                max: range.max,
            });
        }
        if config.block_exponent {
            scale = floor_power_of_two(scale);
        }

        // zero point is always an integer, even for a fractional scale
        let zero_point = -scale * range.midpoint_sum() / 2.0;
        if !(zero_point.abs() <= MAX_ZERO_POINT) {
            return Err(QuantizationError::ZeroPointOverflow { zero_point });
        }
        let zero = zero_point.floor() as i64;

        Ok(AffineQuantizer {
            scale,
            zero,
            nbits: config.nbits,
        })
    }

    pub fn q_min(&self) -> i32 {
        (-(1_i64 << (self.nbits - 1))) as i32
    }

    pub fn q_max(&self) -> i32 {
        ((1_i64 << (self.nbits - 1)) - 1) as i32
    }

    /// Quantizes a single value, returning the code and whether it had to be
    /// saturated into `[q_min, q_max]`.
    ///
    /// The deterministic `+1 ... -1` shift relies on round-half-to-even: the
    /// top of the range lands at `q_max + 0.5`, which is shifted to the even
    /// `q_max + 1.5 -> q_max + 1` and back down to `q_max`.
    pub fn quantize_value(&self, x: f64, rounding: &mut RoundingPolicy<'_>) -> (i32, bool) {
        let scaled = self.scale * x + self.zero as f64;
        let code = match rounding {
            RoundingPolicy::Deterministic => (scaled + 1.0).round_ties_even() - 1.0,
            RoundingPolicy::Stochastic(rng) => {
                let u: f64 = rng.random();
                (scaled + u - 0.5).round_ties_even()
            }
        };

        let clamped = code.clamp(self.q_min() as f64, self.q_max() as f64);
        (clamped as i32, clamped != code)
    }

    pub fn dequantize_value(&self, q: i32) -> f64 {
        (q as f64 - self.zero as f64) / self.scale
    }

    /// Worst-case reconstruction error of deterministic rounding.
    pub fn max_error(&self) -> f64 {
        0.5 / self.scale
    }

    /// `Some(log2(scale))` when the scale is an exact power of two, so that
    /// dequantization is `(q - zero)` shifted by that many bits.
    pub fn block_shift(&self) -> Option<i32> {
        let exponent = self.scale.log2().round() as i32;
        (2f64.powi(exponent) == self.scale).then_some(exponent)
    }
}

/// Largest power of two not exceeding `value`. `log2` can be off by an ulp
/// near exact powers, so the exponent is checked against the value.
fn floor_power_of_two(value: f64) -> f64 {
    let mut exponent = value.log2().floor() as i32;
    if 2f64.powi(exponent) > value {
        exponent -= 1;
    } else if 2f64.powi(exponent + 1) <= value {
        exponent += 1;
    }
    2f64.powi(exponent)
}
