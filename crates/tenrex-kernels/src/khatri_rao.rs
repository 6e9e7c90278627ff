//! Khatri-Rao and Kronecker products
//!
//! The Khatri-Rao product (column-wise Kronecker product) builds the CP
//! regression designs; the full Kronecker product builds the Tucker ones.
//! Both use the same row-ordering convention as [`crate::unfold`]: in a
//! product the first operand's row index varies slowest, so folding a list
//! left-to-right in ascending mode order matches row-major flattening of the
//! corresponding axes.
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Khatri-Rao product (column-wise Kronecker product) of two matrices
///
/// For matrices A (I × K) and B (J × K), the result C = A ⊙ B has size
/// (I·J × K); each column k of C is the Kronecker product of column k of A
/// and column k of B, with A's row index varying slowest.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the column counts disagree.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenrex_kernels::khatri_rao;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = khatri_rao(&a.view(), &b.view()).unwrap();
/// assert_eq!(c.shape(), &[4, 2]);
///
/// // First column: [1*5, 1*7, 3*5, 3*7]
/// assert_eq!(c[[0, 0]], 5.0);
/// assert_eq!(c[[1, 0]], 7.0);
/// assert_eq!(c[[2, 0]], 15.0);
/// assert_eq!(c[[3, 0]], 21.0);
/// ```
pub fn khatri_rao<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let (i, k1) = (a.shape()[0], a.shape()[1]);
    let (j, k2) = (b.shape()[0], b.shape()[1]);

    if k1 != k2 {
        return Err(KernelError::dimension_mismatch(
            "khatri_rao",
            vec![i, k1],
            vec![j, k2],
            "number of columns must match",
        ));
    }

    let k = k1;
    let mut result = Array2::<T>::zeros((i * j, k));

    for col_idx in 0..k {
        let a_col = a.column(col_idx);
        let b_col = b.column(col_idx);

        for (row_a_idx, a_val) in a_col.iter().enumerate() {
            for (row_b_idx, b_val) in b_col.iter().enumerate() {
                let result_row = row_a_idx * j + row_b_idx;
                result[[result_row, col_idx]] = a_val.clone() * b_val.clone();
            }
        }
    }

    Ok(result)
}

/// Compute the Khatri-Rao product of a sequence of matrices
///
/// Folds left in the order given: `matrices[0]`'s row index varies slowest
/// in the result. Every matrix must share the same column count.
///
/// # Errors
///
/// Returns `EmptyInput` for an empty sequence, or `RankMismatch` naming the
/// first matrix whose column count disagrees with the first one.
pub fn khatri_rao_list<T>(matrices: &[ArrayView2<T>]) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let first = matrices
        .first()
        .ok_or_else(|| KernelError::empty_input("khatri_rao_list", "matrices"))?;
    let rank = first.shape()[1];

    let mut result = first.to_owned();
    for (idx, matrix) in matrices.iter().enumerate().skip(1) {
        if matrix.shape()[1] != rank {
            return Err(KernelError::rank_mismatch(
                "khatri_rao_list",
                rank,
                matrix.shape()[1],
                idx,
            ));
        }
        result = khatri_rao(&result.view(), matrix)?;
    }

    Ok(result)
}

/// Compute the Kronecker product of two matrices
///
/// For matrices A (m×n) and B (p×q), the result C = A ⊗ B has size (mp×nq):
///
/// ```text
/// [ a11*B  a12*B  ...  a1n*B ]
/// [ a21*B  a22*B  ...  a2n*B ]
/// [  ...    ...   ...   ...  ]
/// [ am1*B  am2*B  ...  amn*B ]
/// ```
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenrex_kernels::kronecker;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = kronecker(&a.view(), &b.view());
/// assert_eq!(c.shape(), &[4, 4]);
/// assert_eq!(c[[0, 0]], 5.0);
/// assert_eq!(c[[3, 3]], 32.0);
/// ```
pub fn kronecker<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (m, n) = (a.shape()[0], a.shape()[1]);
    let (p, q) = (b.shape()[0], b.shape()[1]);

    let mut result = Array2::<T>::zeros((m * p, n * q));

    for (i, row_a) in a.rows().into_iter().enumerate() {
        for (j, a_val) in row_a.iter().enumerate() {
            let block_row = i * p;
            let block_col = j * q;

            for (bi, row_b) in b.rows().into_iter().enumerate() {
                for (bj, b_val) in row_b.iter().enumerate() {
                    result[[block_row + bi, block_col + bj]] = a_val.clone() * b_val.clone();
                }
            }
        }
    }

    result
}

/// Compute the Kronecker product of a sequence of matrices
///
/// Folds left in the order given, so `matrices[0]`'s indices vary slowest,
/// matching [`khatri_rao_list`] and row-major vectorization.
///
/// # Errors
///
/// Returns `EmptyInput` for an empty sequence.
pub fn kronecker_list<T>(matrices: &[ArrayView2<T>]) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let first = matrices
        .first()
        .ok_or_else(|| KernelError::empty_input("kronecker_list", "matrices"))?;

    let mut result = first.to_owned();
    for matrix in matrices.iter().skip(1) {
        result = kronecker(&result.view(), matrix);
    }

    Ok(result)
}
