//! CP (Kruskal) weight structure
//!
//! The weight tensor is a sum of R rank-1 terms:
//!
//! W ≈ Σᵣ (f₁ᵣ ⊗ f₂ᵣ ⊗ ... ⊗ f_Mᵣ)
//!
//! with factor matrices F_m ∈ ℝ^(d_m × R). Each ALS block update fixes all
//! factors but one and solves a ridge problem for the free factor: the
//! mode-m unfolding of W is F_m · KR(F_{k≠m})ᵀ, so the responses are linear
//! in the entries of F_m with a design built from the samples' mode-m
//! unfoldings and the Khatri-Rao product of the fixed factors.

use scirs2_core::ndarray_ext::{Array, Array1, Array2, ArrayView, ArrayView1, IxDyn, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use scirs2_core::random::rngs::StdRng;
use scirs2_core::random::{Distribution, RandNormal as Normal};
use std::iter::Sum;

use tenrex_kernels::{cp_to_tensor, khatri_rao_list, partial_unfold, KernelError};

use crate::error::{RegressionError, RegressionResult};
use crate::regression::WeightModel;
use crate::ridge::ridge_solve;

/// Kruskal-structured weight tensor
#[derive(Debug, Clone)]
pub struct CpWeights<T> {
    factors: Vec<Array2<T>>,
    rank: usize,
}

impl<T> CpWeights<T> {
    /// Factor matrices, one per feature mode, each of shape (d_m, rank)
    pub fn factors(&self) -> &[Array2<T>] {
        &self.factors
    }

    /// Number of rank-1 components
    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl<T> WeightModel<T> for CpWeights<T>
where
    T: Float + NumAssign + Sum + ScalarOperand + Send + Sync + 'static,
{
    type Rank = usize;

    fn validate_rank(rank: &usize, _feature_shape: &[usize]) -> RegressionResult<()> {
        if *rank == 0 {
            return Err(RegressionError::InvalidRank(
                "CP rank must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn initialize(feature_shape: &[usize], rank: &usize, rng: &mut StdRng) -> Self {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let factors = feature_shape
            .iter()
            .map(|&d| {
                Array2::from_shape_fn((d, *rank), |_| T::from(normal.sample(&mut *rng)).unwrap())
            })
            .collect();

        Self {
            factors,
            rank: *rank,
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
        let rank = self.rank;

        for mode in 0..n_modes {
            let d_mode = self.factors[mode].shape()[0];

            // Khatri-Rao product of the fixed factors, ascending mode order
            let others: Vec<_> = self
                .factors
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != mode)
                .map(|(_, f)| f.view())
                .collect();

            let kr = if others.is_empty() {
                Array2::<T>::ones((1, rank))
            } else {
                khatri_rao_list(&others)?
            };

            // Samples unfolded along this mode: (N, d_mode, prod d_others)
            let unfolded = partial_unfold(x, mode, 1)?;
            let j = unfolded.shape()[2];
            if kr.shape()[0] != j {
                return Err(KernelError::dimension_mismatch(
                    "cp_als_sweep",
                    vec![j, rank],
                    kr.shape().to_vec(),
                    "Khatri-Rao rows must match the unfolded feature columns",
                )
                .into());
            }

            // Design column (a, c) collapses the fixed factors into each
            // sample: design[i, a*rank + c] = Σ_b X_i^(mode)[a, b] * KR[b, c]
            let mut design = Array2::<T>::zeros((n, d_mode * rank));
            for i in 0..n {
                for a in 0..d_mode {
                    for b in 0..j {
                        let xv = unfolded[[i, a, b]];
                        for c in 0..rank {
                            design[[i, a * rank + c]] += xv * kr[[b, c]];
                        }
                    }
                }
            }

            let solution = ridge_solve(&design.view(), y, reg)?;
            self.factors[mode] = reshape_factor(solution, d_mode, rank)?;
        }

        Ok(())
    }

    fn reconstruct(&self) -> RegressionResult<Array<T, IxDyn>> {
        let views: Vec<_> = self.factors.iter().map(|f| f.view()).collect();
        Ok(cp_to_tensor(&views)?)
    }

    fn n_params(&self) -> usize {
        self.factors.iter().map(|f| f.len()).sum()
    }

    fn all_finite(&self) -> bool {
        self.factors
            .iter()
            .all(|f| f.iter().all(|v| v.is_finite()))
    }
}

/// Row-major reshape of a solved coefficient vector into a factor matrix
fn reshape_factor<T>(solution: Array1<T>, d: usize, rank: usize) -> RegressionResult<Array2<T>> {
    solution
        .into_shape_with_order((d, rank))
        .map_err(|e| RegressionError::ShapeMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;
    use scirs2_core::random::SeedableRng;

    #[test]
    fn test_validate_rank() {
        assert!(CpWeights::<f64>::validate_rank(&0, &[3, 4]).is_err());
        assert!(CpWeights::<f64>::validate_rank(&1, &[3, 4]).is_ok());
        assert!(CpWeights::<f64>::validate_rank(&10, &[3, 4]).is_ok());
    }

    #[test]
    fn test_initialize_shapes() {
        let mut rng = StdRng::seed_from_u64(0);
        let weights = CpWeights::<f64>::initialize(&[3, 4, 5], &2, &mut rng);

        assert_eq!(weights.factors().len(), 3);
        assert_eq!(weights.factors()[0].shape(), &[3, 2]);
        assert_eq!(weights.factors()[1].shape(), &[4, 2]);
        assert_eq!(weights.factors()[2].shape(), &[5, 2]);
        assert_eq!(weights.rank(), 2);
        assert_eq!(weights.n_params(), 24);
        assert!(weights.all_finite());
    }

    #[test]
    fn test_reconstruct_rank_one() {
        let weights = CpWeights {
            factors: vec![array![[1.0], [2.0]], array![[3.0], [4.0], [5.0]]],
            rank: 1,
        };

        let tensor = weights.reconstruct().unwrap();
        assert_eq!(tensor.shape(), &[2, 3]);
        assert!((tensor[[0, 0]] - 3.0).abs() < 1e-12);
        assert!((tensor[[0, 2]] - 5.0).abs() < 1e-12);
        assert!((tensor[[1, 1]] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_fits_rank_one_target() {
        // Samples are indicator tensors, so responses enumerate the entries
        // of the true weight tensor; one block update should already land
        // close with tiny regularization
        let true_weights = CpWeights {
            factors: vec![array![[1.0], [2.0]], array![[1.0], [-1.0]]],
            rank: 1,
        };
        let target = true_weights.reconstruct().unwrap();

        let n = 4;
        let mut x = Array::<f64, _>::zeros(IxDyn(&[n, 2, 2]));
        let mut y = Array1::<f64>::zeros(n);
        for i in 0..n {
            let (a, b) = (i / 2, i % 2);
            x[[i, a, b]] = 1.0;
            y[i] = target[[a, b]];
        }

        let mut rng = StdRng::seed_from_u64(7);
        let mut weights = CpWeights::<f64>::initialize(&[2, 2], &1, &mut rng);

        let mut prev = f64::INFINITY;
        for _ in 0..20 {
            weights.als_sweep(&x.view(), &y.view(), 1e-6).unwrap();
            let recon = weights.reconstruct().unwrap();
            let err: f64 = recon
                .iter()
                .zip(target.iter())
                .map(|(r, t)| (r - t).powi(2))
                .sum();
            assert!(err <= prev + 1e-6);
            prev = err;
        }

        assert!(prev < 1e-6, "final squared error {} too large", prev);
    }

    #[test]
    fn test_sweep_rejects_inconsistent_factor_rows() {
        // Factor rows out of sync with the sample shape is a fatal internal
        // inconsistency, reported through the kernel dimension taxonomy
        let mut weights = CpWeights {
            factors: vec![Array2::<f64>::ones((2, 1)), Array2::<f64>::ones((3, 1))],
            rank: 1,
        };
        let x = Array::<f64, _>::ones(IxDyn(&[2, 2, 2]));
        let y = Array1::<f64>::zeros(2);

        let result = weights.als_sweep(&x.view(), &y.view(), 1e-6);
        assert!(matches!(result, Err(RegressionError::Kernel(_))));
    }

    #[test]
    fn test_sweep_single_feature_mode() {
        // M = 1 degenerates to ordinary ridge regression on vectors
        let n = 3;
        let mut x = Array::<f64, _>::zeros(IxDyn(&[n, 2]));
        x[[0, 0]] = 1.0;
        x[[1, 1]] = 1.0;
        x[[2, 0]] = 1.0;
        x[[2, 1]] = 1.0;
        let y = array![2.0, 3.0, 5.0];

        let mut rng = StdRng::seed_from_u64(1);
        let mut weights = CpWeights::<f64>::initialize(&[2], &1, &mut rng);
        weights.als_sweep(&x.view(), &y.view(), 1e-8).unwrap();

        let recon = weights.reconstruct().unwrap();
        assert_eq!(recon.shape(), &[2]);
        assert!((recon[[0]] - 2.0).abs() < 1e-3);
        assert!((recon[[1]] - 3.0).abs() < 1e-3);
    }
}
