pub mod affine_quantizer;
pub mod config;
pub mod range;

use ndarray::{Array, ArrayBase, Data, Dimension};
use tracing::{debug, warn};

pub use affine_quantizer::AffineQuantizer;
pub use config::{QuantizerConfig, RoundingPolicy};
pub use range::QuantizationRange;

use crate::error::Result;

/// Integer codes of a quantized array together with the transform that
/// produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized<D: Dimension> {
    pub codes: Array<i32, D>,
    pub quantizer: AffineQuantizer,
    /// Number of codes that were clamped into the representable range.
    pub saturated: usize,
}

impl<D: Dimension> Quantized<D> {
    pub fn scale(&self) -> f64 {
        self.quantizer.scale
    }

    pub fn zero_point(&self) -> i64 {
        self.quantizer.zero
    }

    /// `(q - b) / a` for every code.
    pub fn dequantize(&self) -> Array<f64, D> {
        self.codes.mapv(|q| self.quantizer.dequantize_value(q))
    }

    pub fn into_parts(self) -> (Array<i32, D>, f64, i64) {
        (self.codes, self.quantizer.scale, self.quantizer.zero)
    }
}

/// Quantize `x` to signed `config.nbits` codes, `x ~ (q - b) / a`.
///
/// The range, scale and zero-point are derived from `x` alone. Every error is
/// reported before any code is produced.
pub fn quantize<A, S, D>(
    x: &ArrayBase<S, D>,
    config: &QuantizerConfig,
    mut rounding: RoundingPolicy<'_>,
) -> Result<Quantized<D>>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    config.validate()?;
    let range = QuantizationRange::from_array(x, config.symmetric)?;
    let quantizer = AffineQuantizer::new(range, config)?;
    debug!(
        nbits = config.nbits,
        min = range.min,
        max = range.max,
        scale = quantizer.scale,
        zero = quantizer.zero,
        stochastic = rounding.is_stochastic(),
        "Quantizing {} values",
        x.len()
    );

    let mut saturated = 0;
    let codes = x.map(|&v| {
        let (code, clamped) = quantizer.quantize_value(v.into(), &mut rounding);
        saturated += clamped as usize;
        code
    });

    if saturated > 0 {
        if rounding.is_stochastic() {
            debug!(saturated, "Stochastic rounding drew codes past the range edge");
        } else {
            warn!(
                saturated,
                scale = quantizer.scale,
                zero = quantizer.zero,
                "Deterministic codes left the representable range"
            );
        }
    }

    Ok(Quantized {
        codes,
        quantizer,
        saturated,
    })
}
