use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantizationError {
    /// The range collapsed to a point, so the scale would divide by zero.
    #[error("Degenerate range: min {min} equals max {max}")]
    DegenerateRange { min: f64, max: f64 },
    #[error("Cannot quantize an empty array")]
    EmptyInput,
    #[error("Non-finite value at index {index}")]
    NonFinite { index: usize },
    /// The range sits so far from zero that `scale * x + zero` no longer
    /// resolves fractions of a code in `f64`.
    #[error("Zero point {zero_point} is too large for sub-code precision")]
    ZeroPointOverflow { zero_point: f64 },
    #[error("Unsupported bit width {0}, expected 2..=31")]
    UnsupportedBitWidth(u32),
}

pub type Result<T> = std::result::Result<T, QuantizationError>;
