//! Mode-n unfolding (matricization) and folding
//!
//! Unfolding rearranges a tensor into a matrix whose rows index one chosen
//! mode and whose columns index the flattened remaining modes. The convention
//! used throughout this workspace is fixed: the chosen mode moves to the
//! front, and the remaining modes are flattened row-major in ascending mode
//! order. `fold` is the exact inverse, so `fold(unfold(T, m), m, T.shape())`
//! reproduces `T` bit for bit.
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array, Array2, ArrayView, ArrayView2, IxDyn};
use scirs2_core::numeric::Num;

/// Unfold a tensor along a specified mode into a matrix
///
/// For tensor X with shape (I₁, ..., Iₖ, ..., Iₙ), the result has shape
/// (Iₖ, ∏ᵢ≠ₖ Iᵢ) with the non-mode axes flattened in ascending order.
///
/// # Errors
///
/// Returns `InvalidMode` if `mode` is out of bounds.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use tenrex_kernels::unfold;
///
/// let tensor = Array::<f64, _>::zeros(vec![2, 3, 4]);
/// let unfolded = unfold(&tensor.view(), 1).unwrap();
/// assert_eq!(unfolded.shape(), &[3, 8]); // 8 = 2 * 4
/// ```
pub fn unfold<T>(tensor: &ArrayView<T, IxDyn>, mode: usize) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let shape = tensor.shape();
    let rank = shape.len();

    if mode >= rank {
        return Err(KernelError::invalid_mode(
            mode,
            rank,
            "unfold mode must address an existing axis",
        ));
    }

    let mode_size = shape[mode];
    let other_size: usize = shape
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != mode)
        .map(|(_, &s)| s)
        .product();

    // Permutation: [mode, 0, 1, ..., mode-1, mode+1, ..., rank-1]
    let mut perm: Vec<usize> = Vec::with_capacity(rank);
    perm.push(mode);
    for i in 0..rank {
        if i != mode {
            perm.push(i);
        }
    }

    let permuted = tensor.clone().permuted_axes(IxDyn(&perm));
    let contiguous = permuted.as_standard_layout().into_owned();
    contiguous
        .into_shape_with_order((mode_size, other_size))
        .map_err(|_| {
            KernelError::dimension_mismatch(
                "unfold",
                vec![mode_size, other_size],
                shape.to_vec(),
                "reshape after permutation failed",
            )
        })
}

/// Fold a matrix back into a tensor along a specified mode
///
/// Inverse operation of [`unfold`]: the matrix rows index `shape[mode]` and
/// the columns index the remaining axes flattened in ascending order.
///
/// # Errors
///
/// Returns `InvalidMode` if `mode` is out of bounds for `shape`, or
/// `DimensionMismatch` if the matrix shape is incompatible with `shape`.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use tenrex_kernels::fold;
///
/// let matrix = Array2::<f64>::zeros((3, 8));
/// let tensor = fold(&matrix.view(), 1, &[2, 3, 4]).unwrap();
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// ```
pub fn fold<T>(
    matrix: &ArrayView2<T>,
    mode: usize,
    shape: &[usize],
) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    if mode >= shape.len() {
        return Err(KernelError::invalid_mode(
            mode,
            shape.len(),
            "fold mode must address an existing axis",
        ));
    }

    let mode_size = shape[mode];
    let other_size: usize = shape
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != mode)
        .map(|(_, &s)| s)
        .product();

    if matrix.shape() != [mode_size, other_size] {
        return Err(KernelError::dimension_mismatch(
            "fold",
            vec![mode_size, other_size],
            matrix.shape().to_vec(),
            "matrix incompatible with target shape and mode",
        ));
    }

    // Intermediate shape: [mode_size, other_dims...]
    let mut inter_shape = Vec::with_capacity(shape.len());
    inter_shape.push(mode_size);
    for (i, &s) in shape.iter().enumerate() {
        if i != mode {
            inter_shape.push(s);
        }
    }

    let inter = matrix
        .to_owned()
        .into_shape_with_order(IxDyn(&inter_shape))
        .map_err(|_| {
            KernelError::dimension_mismatch(
                "fold",
                inter_shape.clone(),
                matrix.shape().to_vec(),
                "reshape to intermediate tensor failed",
            )
        })?;

    // Inverse permutation back to the original axis order
    let mut inv_perm = vec![0; shape.len()];
    inv_perm[mode] = 0;
    let mut idx = 1;
    for (i, item) in inv_perm.iter_mut().enumerate() {
        if i != mode {
            *item = idx;
            idx += 1;
        }
    }

    Ok(inter.permuted_axes(IxDyn(&inv_perm)))
}
