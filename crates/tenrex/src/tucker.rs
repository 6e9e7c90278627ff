//! Tucker weight structure
//!
//! The weight tensor is a core tensor contracted with one factor matrix per
//! mode:
//!
//! W ≈ G ×₁ F₁ ×₂ F₂ ... ×_M F_M
//!
//! with core G ∈ ℝ^(r₁ × ... × r_M) and factors F_m ∈ ℝ^(d_m × r_m). An ALS
//! sweep updates each factor against the others and the core, then refreshes
//! the core itself. The factor subproblem follows from the identity
//! unfold_m(W) = F_m · G_(m) · (⊗_{k≠m} F_k)ᵀ and the core subproblem from
//! vec(W) = (⊗_k F_k) · vec(G), both under the crate-wide row-major
//! flattening convention.

use scirs2_core::ndarray_ext::{Array, Array1, Array2, ArrayView, ArrayView1, IxDyn, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use scirs2_core::random::rngs::StdRng;
use scirs2_core::random::{Distribution, RandNormal as Normal};
use std::iter::Sum;

use tenrex_kernels::{
    kronecker_list, partial_unfold, partial_vec, tucker_to_tensor, unfold, KernelError,
};

use crate::error::{RegressionError, RegressionResult};
use crate::regression::WeightModel;
use crate::ridge::ridge_solve;

/// Tucker-structured weight tensor
#[derive(Debug, Clone)]
pub struct TuckerWeights<T> {
    core: Array<T, IxDyn>,
    factors: Vec<Array2<T>>,
    ranks: Vec<usize>,
}

impl<T> TuckerWeights<T> {
    /// The core tensor, of shape (r₁, ..., r_M)
    pub fn core(&self) -> &Array<T, IxDyn> {
        &self.core
    }

    /// Factor matrices, one per feature mode, each of shape (d_m, r_m)
    pub fn factors(&self) -> &[Array2<T>] {
        &self.factors
    }

    /// Per-mode ranks
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }
}

impl<T> WeightModel<T> for TuckerWeights<T>
where
    T: Float + NumAssign + Sum + ScalarOperand + Send + Sync + 'static,
{
    type Rank = Vec<usize>;

    fn validate_rank(ranks: &Vec<usize>, feature_shape: &[usize]) -> RegressionResult<()> {
        if ranks.len() != feature_shape.len() {
            return Err(RegressionError::InvalidRank(format!(
                "expected {} Tucker ranks for {} feature modes, got {}",
                feature_shape.len(),
                feature_shape.len(),
                ranks.len()
            )));
        }

        if let Some(mode) = ranks.iter().position(|&r| r == 0) {
            return Err(RegressionError::InvalidRank(format!(
                "Tucker rank for mode {} must be positive",
                mode
            )));
        }

        Ok(())
    }

    fn initialize(feature_shape: &[usize], ranks: &Vec<usize>, rng: &mut StdRng) -> Self {
        let normal = Normal::new(0.0, 1.0).unwrap();

        let factors: Vec<Array2<T>> = feature_shape
            .iter()
            .zip(ranks.iter())
            .map(|(&d, &r)| {
                Array2::from_shape_fn((d, r), |_| T::from(normal.sample(&mut *rng)).unwrap())
            })
            .collect();

        let core = Array::from_shape_fn(IxDyn(ranks), |_| {
            T::from(normal.sample(&mut *rng)).unwrap()
        });

        Self {
            core,
            factors,
            ranks: ranks.clone(),
        }
    }

    fn als_sweep(
        &mut self,
        x: &ArrayView<T, IxDyn>,
        y: &ArrayView1<T>,
        reg: T,
    ) -> RegressionResult<()> {
        let n = x.shape()[0];
        let n_modes = self.factors.len();

        for mode in 0..n_modes {
            let d_mode = self.factors[mode].shape()[0];
            let r_mode = self.ranks[mode];

            // Kronecker product of the fixed factors, ascending mode order
            let others: Vec<_> = self
                .factors
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != mode)
                .map(|(_, f)| f.view())
                .collect();

            let kron = if others.is_empty() {
                Array2::<T>::ones((1, 1))
            } else {
                kronecker_list(&others)?
            };

            // Collapse the core into the fixed factors:
            // cmat = (⊗_{k≠m} F_k) · G_(m)ᵀ, shape (prod d_others, r_mode)
            let core_unfolded = unfold(&self.core.view(), mode)?;
            let j = kron.shape()[0];
            let r_others = kron.shape()[1];
            if core_unfolded.shape()[1] != r_others {
                return Err(KernelError::dimension_mismatch(
                    "tucker_als_sweep",
                    vec![r_mode, r_others],
                    core_unfolded.shape().to_vec(),
                    "core unfolding columns must match the Kronecker columns",
                )
                .into());
            }

            let mut cmat = Array2::<T>::zeros((j, r_mode));
            for b in 0..j {
                for s in 0..r_others {
                    let kv = kron[[b, s]];
                    for c in 0..r_mode {
                        cmat[[b, c]] += kv * core_unfolded[[c, s]];
                    }
                }
            }

            // Same design layout as the CP factor update, with cmat in place
            // of the Khatri-Rao product
            let unfolded = partial_unfold(x, mode, 1)?;
            if unfolded.shape()[2] != j {
                return Err(KernelError::dimension_mismatch(
                    "tucker_als_sweep",
                    vec![j],
                    vec![unfolded.shape()[2]],
                    "Kronecker rows must match the unfolded feature columns",
                )
                .into());
            }

            let mut design = Array2::<T>::zeros((n, d_mode * r_mode));
            for i in 0..n {
                for a in 0..d_mode {
                    for b in 0..j {
                        let xv = unfolded[[i, a, b]];
                        for c in 0..r_mode {
                            design[[i, a * r_mode + c]] += xv * cmat[[b, c]];
                        }
                    }
                }
            }

            let solution = ridge_solve(&design.view(), y, reg)?;
            self.factors[mode] = solution
                .into_shape_with_order((d_mode, r_mode))
                .map_err(|e| RegressionError::ShapeMismatch(e.to_string()))?;
        }

        self.refresh_core(x, y, reg)
    }

    fn reconstruct(&self) -> RegressionResult<Array<T, IxDyn>> {
        let views: Vec<_> = self.factors.iter().map(|f| f.view()).collect();
        Ok(tucker_to_tensor(&self.core.view(), &views)?)
    }

    fn n_params(&self) -> usize {
        self.core.len() + self.factors.iter().map(|f| f.len()).sum::<usize>()
    }

    fn all_finite(&self) -> bool {
        self.core.iter().all(|v| v.is_finite())
            && self
                .factors
                .iter()
                .all(|f| f.iter().all(|v| v.is_finite()))
    }
}

impl<T> TuckerWeights<T>
where
    T: Float + NumAssign + Sum + ScalarOperand + Send + Sync + 'static,
{
    /// Solve for the core with all factors held fixed
    ///
    /// Uses vec(W) = (⊗_k F_k) · vec(G): the design row for sample i is the
    /// flattened sample times the full Kronecker product of the factors.
    fn refresh_core(
        &mut self,
        x: &ArrayView<T, IxDyn>,
        y: &ArrayView1<T>,
        reg: T,
    ) -> RegressionResult<()> {
        let n = x.shape()[0];

        let views: Vec<_> = self.factors.iter().map(|f| f.view()).collect();
        let kron_all = kronecker_list(&views)?;
        let p = kron_all.shape()[0];
        let r_total = kron_all.shape()[1];

        let x_flat = partial_vec(x, 1)?;
        if x_flat.shape()[1] != p {
            return Err(KernelError::dimension_mismatch(
                "tucker_core_refresh",
                vec![p],
                vec![x_flat.shape()[1]],
                "flattened sample length must match the Kronecker rows",
            )
            .into());
        }

        let mut design = Array2::<T>::zeros((n, r_total));
        for i in 0..n {
            for b in 0..p {
                let xv = x_flat[[i, b]];
                for c in 0..r_total {
                    design[[i, c]] += xv * kron_all[[b, c]];
                }
            }
        }

        let solution: Array1<T> = ridge_solve(&design.view(), y, reg)?;
        self.core = solution
            .into_shape_with_order(IxDyn(&self.ranks))
            .map_err(|e| RegressionError::ShapeMismatch(e.to_string()))?;

        Ok(())
    }
}
