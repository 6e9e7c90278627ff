//! Dense reconstruction from CP and Tucker factors
//!
//! Both reconstructions are deterministic and side-effect-free; the
//! regression engine uses them for the per-sweep residual check and caches
//! the result for prediction and inspection.
//!
//! `cp_to_tensor` is expressed through [`khatri_rao_list`] and [`fold`] so
//! that reconstruction and the ALS design matrices share one ordering
//! convention; a mismatch there corrupts results silently, which is why the
//! property tests compare this path against direct outer-product summation.

use crate::error::{KernelError, KernelResult};
use crate::khatri_rao::khatri_rao_list;
use crate::nmode::mode_product;
use crate::unfold::fold;
use scirs2_core::ndarray_ext::{Array, Array2, ArrayView, ArrayView2, IxDyn};
use scirs2_core::numeric::Num;

/// Reconstruct the dense tensor implied by CP factors
///
/// For factors F₁ (d₁ × r), ..., Fₘ (dₘ × r) the result has shape
/// (d₁, ..., dₘ) and equals the sum over k of the outer product of column k
/// across all factors.
///
/// # Errors
///
/// Returns `EmptyInput` for an empty factor list, or `RankMismatch` if the
/// factors disagree on their column count.
///
/// # Complexity
///
/// Time: O(r × ∏ᵢ dᵢ)
pub fn cp_to_tensor<T>(factors: &[ArrayView2<T>]) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    let first = factors
        .first()
        .ok_or_else(|| KernelError::empty_input("cp_to_tensor", "factors"))?;
    let rank = first.shape()[1];

    for (idx, factor) in factors.iter().enumerate().skip(1) {
        if factor.shape()[1] != rank {
            return Err(KernelError::rank_mismatch(
                "cp_to_tensor",
                rank,
                factor.shape()[1],
                idx,
            ));
        }
    }

    let shape: Vec<usize> = factors.iter().map(|f| f.shape()[0]).collect();

    // Single mode: the tensor is the per-row sum over components
    if factors.len() == 1 {
        let d = first.shape()[0];
        let mut data = Vec::with_capacity(d);
        for i in 0..d {
            let mut sum = T::zero();
            for r in 0..rank {
                sum = sum + first[[i, r]].clone();
            }
            data.push(sum);
        }
        return Array::from_shape_vec(IxDyn(&shape), data).map_err(|_| {
            KernelError::dimension_mismatch(
                "cp_to_tensor",
                shape.clone(),
                vec![d],
                "single-mode reconstruction failed",
            )
        });
    }

    // unfold_0(W) = F_0 · (F_1 ⊙ ... ⊙ F_{M-1})ᵀ
    let kr = khatri_rao_list(&factors[1..])?;
    let d0 = first.shape()[0];
    let cols = kr.shape()[0];

    let mut unfolded = Array2::<T>::zeros((d0, cols));
    for i in 0..d0 {
        for j in 0..cols {
            let mut sum = T::zero();
            for r in 0..rank {
                sum = sum + first[[i, r]].clone() * kr[[j, r]].clone();
            }
            unfolded[[i, j]] = sum;
        }
    }

    fold(&unfolded.view(), 0, &shape)
}

/// Reconstruct the dense tensor implied by a Tucker core and factors
///
/// Computes G ×₁ F₁ ×₂ F₂ ... ×ₘ Fₘ; for core shape (r₁, ..., rₘ) and
/// factors Fᵢ (dᵢ × rᵢ), the result has shape (d₁, ..., dₘ).
///
/// # Errors
///
/// Returns `DimensionMismatch` if the factor count differs from the core's
/// mode count, or if any factor's column count differs from the matching
/// core dimension.
///
/// # Complexity
///
/// Time: O(M × ∏ᵢ max(rᵢ, dᵢ) × ∏ᵢ dᵢ) via successive mode products
pub fn tucker_to_tensor<T>(
    core: &ArrayView<T, IxDyn>,
    factors: &[ArrayView2<T>],
) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    if factors.len() != core.ndim() {
        return Err(KernelError::dimension_mismatch(
            "tucker_to_tensor",
            vec![core.ndim()],
            vec![factors.len()],
            "one factor matrix per core mode is required",
        ));
    }

    for (mode, factor) in factors.iter().enumerate() {
        if factor.shape()[1] != core.shape()[mode] {
            return Err(KernelError::dimension_mismatch(
                "tucker_to_tensor",
                vec![factor.shape()[0], core.shape()[mode]],
                factor.shape().to_vec(),
                "factor columns must match the core dimension for its mode",
            ));
        }
    }

    let mut result = core.to_owned();
    for (mode, factor) in factors.iter().enumerate() {
        result = mode_product(&result.view(), factor, mode)?;
    }

    Ok(result)
}
