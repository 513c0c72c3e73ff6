//! Statistics functions

use ndarray::prelude::*;
use ndarray::DataMut;
use ndarray_stats::errors::QuantileError;
use noisy_float::prelude::n64;

/// Return the `q`-quantile, interpolating linearly between order statistics
/// as pandas does. Sorts its argument in place.
pub fn quantile_mut<S>(xs: &mut ArrayBase<S, Ix1>, q: f64) -> Result<f64, QuantileError>
where
    S: DataMut<Elem = f64>,
{
    if xs.is_empty() {
        return Err(QuantileError::EmptyInput);
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(QuantileError::InvalidQuantile(n64(q)));
    }
    let slice = xs
        .as_slice_mut()
        .expect("an attempt was made to compute a quantile of non-contiguous data");
    slice.sort_unstable_by_key(|&v| n64(v));

    let rank = q * (slice.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Ok(slice[lo] + (slice[hi] - slice[lo]) * (rank - lo as f64))
}

/// Return the median. Sorts its argument in place.
pub fn median_mut<S>(xs: &mut ArrayBase<S, Ix1>) -> Result<f64, QuantileError>
where
    S: DataMut<Elem = f64>,
{
    quantile_mut(xs, 0.5)
}
