use std::ops::Range;

use ndarray::{Array, ArrayBase, Data, Dimension, ShapeBuilder, Zip};
use rand::Rng;

/// Array of the given shape filled with values drawn uniformly from `range`.
pub fn random_array<Sh, D, R>(shape: Sh, range: Range<f64>, rng: &mut R) -> Array<f64, D>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
    R: Rng,
{
    Array::from_shape_simple_fn(shape, || rng.random_range(range.clone()))
}

/// Largest elementwise absolute difference. Panics if the shapes differ.
pub fn max_abs_error<S1, S2, D>(a: &ArrayBase<S1, D>, b: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    Zip::from(a)
        .and(b)
        .fold(0.0, |acc, &x, &y| f64::max(acc, (x - y).abs()))
}

/// Mean of the squared elementwise differences, 0 for empty arrays. Panics if
/// the shapes differ.
pub fn mean_squared_error<S1, S2, D>(a: &ArrayBase<S1, D>, b: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    assert_eq!(a.shape(), b.shape(), "Shapes must be equal");
    if a.is_empty() {
        return 0.0;
    }
    let sum = Zip::from(a)
        .and(b)
        .fold(0.0, |acc, &x, &y| acc + (x - y).powi(2));
    sum / a.len() as f64
}
