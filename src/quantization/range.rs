use ndarray::{ArrayBase, Data, Dimension};

use crate::error::{QuantizationError, Result};

/// Real interval `[min, max]` mapped onto the full code range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationRange {
    pub min: f64,
    pub max: f64,
}

impl QuantizationRange {
    /// Asymmetric ranges span the data's min and max, symmetric ones span
    /// `[-max|x|, max|x|]`. Fails on empty, non-finite or constant data.
    pub fn from_array<A, S, D>(x: &ArrayBase<S, D>, symmetric: bool) -> Result<Self>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let (min, max) = min_and_max(x.iter().map(|&v| v.into()))?;
        let range = if symmetric {
            let bound = min.abs().max(max.abs());
            QuantizationRange {
                min: -bound,
                max: bound,
            }
        } else {
            QuantizationRange { min, max }
        };

        if range.max == range.min {
            return Err(QuantizationError::DegenerateRange {
                min: range.min,
                max: range.max,
            });
        }
        Ok(range)
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint_sum(&self) -> f64 {
        self.min + self.max
    }
}

fn min_and_max(values: impl Iterator<Item = f64>) -> Result<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for (index, v) in values.enumerate() {
        if !v.is_finite() {
            return Err(QuantizationError::NonFinite { index });
        }
        bounds = Some(match bounds {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    bounds.ok_or(QuantizationError::EmptyInput)
}
