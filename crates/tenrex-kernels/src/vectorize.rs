//! Batch vectorization helpers
//!
//! A sample batch is a tensor whose leading axes index samples and whose
//! trailing axes carry the per-sample feature modes. `partial_vec` turns such
//! a batch into a design matrix (one flattened sample per row), and
//! `partial_unfold` applies mode-n unfolding to every sample at once. Both
//! flatten row-major in ascending mode order, matching [`crate::unfold`].
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};
use scirs2_core::numeric::Num;

/// Flatten all axes except the first `skip_begin` into one trailing axis
///
/// For a batch of shape (N, d₁, ..., dₘ) and `skip_begin = 1`, the result
/// has shape (N, d₁·...·dₘ) with each row the row-major flattening of one
/// sample.
///
/// # Errors
///
/// Returns `InvalidMode` if `skip_begin` exceeds the tensor's axis count.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use tenrex_kernels::partial_vec;
///
/// let batch = Array::<f64, _>::zeros(vec![10, 3, 4]);
/// let design = partial_vec(&batch.view(), 1).unwrap();
/// assert_eq!(design.shape(), &[10, 12]);
/// ```
pub fn partial_vec<T>(tensor: &ArrayView<T, IxDyn>, skip_begin: usize) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    let shape = tensor.shape();
    if skip_begin > shape.len() {
        return Err(KernelError::invalid_mode(
            skip_begin,
            shape.len() + 1,
            "skip_begin must not exceed the tensor's axis count",
        ));
    }

    let mut new_shape: Vec<usize> = shape[..skip_begin].to_vec();
    new_shape.push(shape[skip_begin..].iter().product());

    let contiguous = tensor.as_standard_layout().into_owned();
    contiguous
        .into_shape_with_order(IxDyn(&new_shape))
        .map_err(|_| {
            KernelError::dimension_mismatch(
                "partial_vec",
                new_shape.clone(),
                shape.to_vec(),
                "reshape to flattened batch failed",
            )
        })
}

/// Unfold every sample of a batch along one feature mode
///
/// `mode` counts feature modes only: for a batch of shape (N, d₁, ..., dₘ)
/// with `skip_begin = 1`, `mode = 0` addresses the d₁ axis. The result keeps
/// the leading sample axes, moves the chosen feature axis next, and flattens
/// the remaining feature axes row-major in ascending order, giving shape
/// (N, d_mode, ∏ other features).
///
/// # Errors
///
/// Returns `InvalidMode` if `skip_begin` or `mode` is out of bounds.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use tenrex_kernels::partial_unfold;
///
/// let batch = Array::<f64, _>::zeros(vec![10, 3, 4, 5]);
/// let unfolded = partial_unfold(&batch.view(), 1, 1).unwrap();
/// assert_eq!(unfolded.shape(), &[10, 4, 15]);
/// ```
pub fn partial_unfold<T>(
    tensor: &ArrayView<T, IxDyn>,
    mode: usize,
    skip_begin: usize,
) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    let shape = tensor.shape();
    let rank = shape.len();

    if skip_begin >= rank {
        return Err(KernelError::invalid_mode(
            skip_begin,
            rank,
            "skip_begin must leave at least one feature mode",
        ));
    }
    let n_feature_modes = rank - skip_begin;
    if mode >= n_feature_modes {
        return Err(KernelError::invalid_mode(
            mode,
            n_feature_modes,
            "unfold mode must address a feature axis",
        ));
    }

    let mode_axis = skip_begin + mode;
    let mode_size = shape[mode_axis];
    let other_size: usize = shape[skip_begin..]
        .iter()
        .enumerate()
        .filter(|(i, _)| skip_begin + *i != mode_axis)
        .map(|(_, &s)| s)
        .product();

    // Permutation: [0..skip_begin, mode_axis, remaining feature axes ascending]
    let mut perm: Vec<usize> = (0..skip_begin).collect();
    perm.push(mode_axis);
    for i in skip_begin..rank {
        if i != mode_axis {
            perm.push(i);
        }
    }

    let mut new_shape: Vec<usize> = shape[..skip_begin].to_vec();
    new_shape.push(mode_size);
    new_shape.push(other_size);

    let permuted = tensor.clone().permuted_axes(IxDyn(&perm));
    let contiguous = permuted.as_standard_layout().into_owned();
    contiguous
        .into_shape_with_order(IxDyn(&new_shape))
        .map_err(|_| {
            KernelError::dimension_mismatch(
                "partial_unfold",
                new_shape.clone(),
                shape.to_vec(),
                "reshape after permutation failed",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unfold::unfold;
    use scirs2_core::ndarray_ext::Array;

    fn iota_tensor(shape: &[usize]) -> Array<f64, IxDyn> {
        let total: usize = shape.iter().product();
        Array::from_shape_vec(IxDyn(shape), (0..total).map(|x| x as f64).collect()).unwrap()
    }

    #[test]
    fn test_partial_vec_rows_are_flattened_samples() {
        let batch = iota_tensor(&[3, 2, 2]);
        let design = partial_vec(&batch.view(), 1).unwrap();

        assert_eq!(design.shape(), &[3, 4]);
        // Sample 1 is [4, 5, 6, 7] in row-major order
        assert_eq!(design[[1, 0]], 4.0);
        assert_eq!(design[[1, 3]], 7.0);
    }

    #[test]
    fn test_partial_vec_skip_zero_full_flatten() {
        let batch = iota_tensor(&[2, 3]);
        let flat = partial_vec(&batch.view(), 0).unwrap();

        assert_eq!(flat.shape(), &[6]);
        assert_eq!(flat[[5]], 5.0);
    }

    #[test]
    fn test_partial_unfold_matches_per_sample_unfold() {
        let batch = iota_tensor(&[4, 2, 3, 2]);
        let unfolded = partial_unfold(&batch.view(), 1, 1).unwrap();
        assert_eq!(unfolded.shape(), &[4, 3, 4]);

        for sample in 0..4 {
            // Slice out one sample and unfold it directly
            let sample_tensor = iota_sample(&batch, sample);
            let direct = unfold(&sample_tensor.view(), 1).unwrap();
            for a in 0..3 {
                for b in 0..4 {
                    assert_eq!(unfolded[[sample, a, b]], direct[[a, b]]);
                }
            }
        }
    }

    fn iota_sample(batch: &Array<f64, IxDyn>, sample: usize) -> Array<f64, IxDyn> {
        let shape: Vec<usize> = batch.shape()[1..].to_vec();
        let total: usize = shape.iter().product();
        Array::from_shape_vec(
            IxDyn(&shape),
            (0..total).map(|i| batch.as_slice().unwrap()[sample * total + i]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_partial_unfold_invalid_mode() {
        let batch = iota_tensor(&[4, 2, 3]);
        let result = partial_unfold(&batch.view(), 2, 1);
        assert!(matches!(result, Err(KernelError::InvalidMode { .. })));
    }

    #[test]
    fn test_partial_vec_skip_too_large() {
        let batch = iota_tensor(&[4, 2]);
        let result = partial_vec(&batch.view(), 3);
        assert!(matches!(result, Err(KernelError::InvalidMode { .. })));
    }
}
