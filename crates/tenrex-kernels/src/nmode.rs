//! Mode-n product (tensor times matrix)
//!
//! For tensor X ∈ ℝ^(I₁×...×Iₙ) and matrix M ∈ ℝ^(J×Iₖ), the result
//! Y = X ×ₖ M has shape (I₁×...×Iₖ₋₁×J×Iₖ₊₁×...×Iₙ). The regression engine
//! relies on it for Tucker reconstruction.
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use crate::error::{KernelError, KernelResult};
use crate::unfold::{fold, unfold};
use scirs2_core::ndarray_ext::{Array, Array2, ArrayView, ArrayView2, IxDyn};
use scirs2_core::numeric::Num;

/// Compute the mode-n product of a tensor and a matrix
///
/// # Algorithm
///
/// 1. Unfold tensor X along mode k to get X_(k) of shape (Iₖ, ∏ᵢ≠ₖ Iᵢ)
/// 2. Compute Y_(k) = M · X_(k)
/// 3. Fold Y_(k) back with the mode-k dimension replaced by M's row count
///
/// # Errors
///
/// Returns `InvalidMode` if `mode` is out of bounds, or `DimensionMismatch`
/// if the matrix column count does not equal the tensor's mode-k size.
///
/// # Complexity
///
/// Time: O(J × Iₖ × ∏ᵢ≠ₖ Iᵢ)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{array, Array};
/// use tenrex_kernels::mode_product;
///
/// let tensor = Array::from_shape_vec(
///     vec![2, 3, 4],
///     (0..24).map(|x| x as f64).collect(),
/// ).unwrap();
///
/// // 5×3 matrix replaces the mode-1 dimension
/// let matrix = array![[1.0, 0.0, 0.0],
///                     [0.0, 1.0, 0.0],
///                     [0.0, 0.0, 1.0],
///                     [1.0, 1.0, 0.0],
///                     [0.0, 1.0, 1.0]];
///
/// let result = mode_product(&tensor.view(), &matrix.view(), 1).unwrap();
/// assert_eq!(result.shape(), &[2, 5, 4]);
/// ```
pub fn mode_product<T>(
    tensor: &ArrayView<T, IxDyn>,
    matrix: &ArrayView2<T>,
    mode: usize,
) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    let tensor_shape = tensor.shape();
    let rank = tensor_shape.len();

    if mode >= rank {
        return Err(KernelError::invalid_mode(
            mode,
            rank,
            "mode product must address an existing axis",
        ));
    }

    let mode_size = tensor_shape[mode];
    let (matrix_rows, matrix_cols) = (matrix.shape()[0], matrix.shape()[1]);

    if matrix_cols != mode_size {
        return Err(KernelError::dimension_mismatch(
            "mode_product",
            vec![matrix_rows, mode_size],
            matrix.shape().to_vec(),
            "matrix columns must match the tensor mode size",
        ));
    }

    let unfolded = unfold(tensor, mode)?;
    let other_size = unfolded.shape()[1];

    // Y_(k) = M · X_(k)
    let mut result_unfolded = Array2::<T>::zeros((matrix_rows, other_size));
    for i in 0..matrix_rows {
        for j in 0..other_size {
            let mut sum = T::zero();
            for k in 0..matrix_cols {
                sum = sum + matrix[[i, k]].clone() * unfolded[[k, j]].clone();
            }
            result_unfolded[[i, j]] = sum;
        }
    }

    let mut new_shape: Vec<usize> = tensor_shape.to_vec();
    new_shape[mode] = matrix_rows;

    fold(&result_unfolded.view(), mode, &new_shape)
}
