//! Alternating least squares driver for low-rank tensor regression
//!
//! The model is y_i ≈ ⟨X_i, W⟩ where each sample X_i is a tensor of shape
//! (d₁, ..., d_M) and the weight tensor W carries a low-rank structure. The
//! structure itself (CP or Tucker) is supplied by a [`WeightModel`]
//! implementation; [`TensorRegressor`] owns the outer loop: initialization,
//! sweeping, loss tracking, convergence, and divergence rollback.

use scirs2_core::ndarray_ext::{Array, Array1, ArrayView, ArrayView1, IxDyn, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use scirs2_core::random::rngs::StdRng;
use scirs2_core::random::SeedableRng;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use tracing::{debug, info};

use tenrex_kernels::partial_vec;

use crate::config::FitConfig;
use crate::error::{RegressionError, RegressionResult};
use crate::metrics::rmse;

/// Low-rank structure fitted block-by-block inside the ALS loop
///
/// Each implementation owns its factor storage and knows how to run one full
/// sweep (update every block once) against a batch of samples. The driver
/// never inspects the factors directly; it only needs the dense
/// reconstruction for loss evaluation and prediction.
pub trait WeightModel<T>: Clone {
    /// Rank descriptor: a single component count for CP, one rank per mode
    /// for Tucker
    type Rank: Clone + Debug;

    /// Check the rank against the feature shape before any allocation
    fn validate_rank(rank: &Self::Rank, feature_shape: &[usize]) -> RegressionResult<()>;

    /// Draw initial factors from N(0, 1)
    fn initialize(feature_shape: &[usize], rank: &Self::Rank, rng: &mut StdRng) -> Self;

    /// Update every block once, holding the others fixed
    ///
    /// `x` has shape (N, d₁, ..., d_M) and `y` length N. `reg` is the ridge
    /// strength applied to each subproblem.
    fn als_sweep(
        &mut self,
        x: &ArrayView<T, IxDyn>,
        y: &ArrayView1<T>,
        reg: T,
    ) -> RegressionResult<()>;

    /// Materialize the dense weight tensor
    fn reconstruct(&self) -> RegressionResult<Array<T, IxDyn>>;

    /// Number of free coefficients in the structure
    fn n_params(&self) -> usize;

    /// True when every stored coefficient is finite
    fn all_finite(&self) -> bool;
}

/// How a fit terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    /// Relative training-loss decrease fell below the tolerance
    Converged,
    /// The sweep budget ran out before convergence
    MaxIterReached,
    /// A sweep produced non-finite values; factors were rolled back
    Diverged,
}

/// Fitted state, present only after a call to `fit`
#[derive(Debug, Clone)]
struct FitState<T, M> {
    model: M,
    weight: Array<T, IxDyn>,
    loss_history: Vec<T>,
    iterations: usize,
    outcome: FitOutcome,
}

/// Tensor regression estimator parameterized by a weight structure
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{Array, Array1, IxDyn};
/// use tenrex::{FitConfig, KruskalRegressor};
///
/// // Ten samples of 3x4 features, responses all zero
/// let x = Array::<f64, _>::ones(IxDyn(&[10, 3, 4]));
/// let y = Array1::<f64>::zeros(10);
///
/// let mut model = KruskalRegressor::new(1, FitConfig::default());
/// model.fit(&x.view(), &y.view()).unwrap();
/// let predictions = model.predict(&x.view()).unwrap();
/// assert_eq!(predictions.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct TensorRegressor<T, M: WeightModel<T>> {
    rank: M::Rank,
    config: FitConfig,
    state: Option<FitState<T, M>>,
}

impl<T, M> TensorRegressor<T, M>
where
    T: Float + NumAssign + NumCast + Sum + ScalarOperand + Display + Send + Sync + 'static,
    M: WeightModel<T>,
{
    /// Create an unfitted estimator
    pub fn new(rank: M::Rank, config: FitConfig) -> Self {
        Self {
            rank,
            config,
            state: None,
        }
    }

    /// Fit the weight tensor to a batch of samples
    ///
    /// `x` has shape (N, d₁, ..., d_M) with the sample index first, `y` has
    /// length N. Runs ALS sweeps until the relative decrease of the training
    /// RMSE falls below `tol` or the sweep budget is exhausted. A sweep that
    /// produces non-finite values rolls the factors back to their pre-sweep
    /// state and returns `NumericalDivergence`; the rolled-back state stays
    /// inspectable through the accessors.
    ///
    /// With `n_iter_max = 0` no sweep runs: the stored state is the seeded
    /// random initialization, reported as `MaxIterReached`, and `predict`
    /// serves the untrained weight. Keep at least one sweep in the budget
    /// unless that is what you want.
    pub fn fit(
        &mut self,
        x: &ArrayView<T, IxDyn>,
        y: &ArrayView1<T>,
    ) -> RegressionResult<FitOutcome> {
        if x.ndim() < 2 {
            return Err(RegressionError::ShapeMismatch(format!(
                "samples must have at least one feature mode, got shape {:?}",
                x.shape()
            )));
        }

        if x.shape()[0] != y.len() {
            return Err(RegressionError::ShapeMismatch(format!(
                "sample count {} does not match response length {}",
                x.shape()[0],
                y.len()
            )));
        }

        let feature_shape = &x.shape()[1..];
        M::validate_rank(&self.rank, feature_shape)?;

        let reg: T = NumCast::from(self.config.reg_w).unwrap();
        let tol: T = NumCast::from(self.config.tol).unwrap();
        let mut rng = StdRng::seed_from_u64(self.config.init_seed);
        let mut model = M::initialize(feature_shape, &self.rank, &mut rng);

        // Flattened once; every loss evaluation is a plain matrix-vector
        // product against the current dense weight
        let x_flat = partial_vec(x, 1)?;

        let mut weight = model.reconstruct()?;
        let mut loss_history: Vec<T> = Vec::with_capacity(self.config.n_iter_max);
        let mut prev_loss = T::zero();
        let mut iterations = 0;
        let mut outcome = FitOutcome::MaxIterReached;

        for sweep in 0..self.config.n_iter_max {
            iterations = sweep + 1;
            let snapshot = model.clone();

            model.als_sweep(x, y, reg)?;

            if !model.all_finite() {
                let weight = snapshot.reconstruct()?;
                self.state = Some(FitState {
                    model: snapshot,
                    weight,
                    loss_history,
                    iterations,
                    outcome: FitOutcome::Diverged,
                });
                return Err(RegressionError::NumericalDivergence { iterations });
            }

            weight = model.reconstruct()?;
            let predictions = predict_flat(&weight, &x_flat);
            let loss = rmse(y, &predictions.view())?;

            if !loss.is_finite() {
                let weight = snapshot.reconstruct()?;
                self.state = Some(FitState {
                    model: snapshot,
                    weight,
                    loss_history,
                    iterations,
                    outcome: FitOutcome::Diverged,
                });
                return Err(RegressionError::NumericalDivergence { iterations });
            }

            loss_history.push(loss);

            if self.config.verbose {
                info!(sweep = iterations, loss = %loss, "als sweep complete");
            } else {
                debug!(sweep = iterations, loss = %loss, "als sweep complete");
            }

            // Relative decrease of training RMSE; an increase counts toward
            // the sweep budget but never triggers convergence
            if sweep > 0 {
                let decrease = prev_loss - loss;
                if decrease >= T::zero() && decrease <= tol * prev_loss {
                    outcome = FitOutcome::Converged;
                    break;
                }
            }

            prev_loss = loss;
        }

        self.state = Some(FitState {
            model,
            weight,
            loss_history,
            iterations,
            outcome,
        });

        Ok(outcome)
    }

    /// Predict responses for a batch of samples
    ///
    /// Requires a successful prior fit; a diverged or never-fitted estimator
    /// returns `NotFitted`. The feature shape of `x` must match the shape
    /// seen during fitting.
    pub fn predict(&self, x: &ArrayView<T, IxDyn>) -> RegressionResult<Array1<T>> {
        let state = self.state.as_ref().ok_or(RegressionError::NotFitted)?;
        if state.outcome == FitOutcome::Diverged {
            return Err(RegressionError::NotFitted);
        }

        if x.ndim() < 2 || &x.shape()[1..] != state.weight.shape() {
            return Err(RegressionError::ShapeMismatch(format!(
                "feature shape {:?} does not match fitted weight shape {:?}",
                &x.shape()[1..],
                state.weight.shape()
            )));
        }

        let x_flat = partial_vec(x, 1)?;
        Ok(predict_flat(&state.weight, &x_flat))
    }

    /// Training-style RMSE of the fitted model on a labelled batch
    pub fn score(&self, x: &ArrayView<T, IxDyn>, y: &ArrayView1<T>) -> RegressionResult<T> {
        let predictions = self.predict(x)?;
        rmse(y, &predictions.view())
    }

    /// Dense weight tensor of the fitted model, if any
    pub fn weight_tensor(&self) -> Option<&Array<T, IxDyn>> {
        self.state.as_ref().map(|s| &s.weight)
    }

    /// The fitted weight structure, if any
    pub fn model(&self) -> Option<&M> {
        self.state.as_ref().map(|s| &s.model)
    }

    /// Training RMSE after each completed sweep
    pub fn loss_history(&self) -> Option<&[T]> {
        self.state.as_ref().map(|s| s.loss_history.as_slice())
    }

    /// Number of sweeps performed by the last fit
    pub fn iterations(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.iterations)
    }

    /// How the last fit terminated
    pub fn outcome(&self) -> Option<FitOutcome> {
        self.state.as_ref().map(|s| s.outcome)
    }

    /// Number of free coefficients in the fitted structure
    pub fn n_params(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.model.n_params())
    }

    /// The configuration this estimator was built with
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// The rank this estimator was built with
    pub fn rank(&self) -> &M::Rank {
        &self.rank
    }
}

/// Inner products of flattened samples against the dense weight
fn predict_flat<T>(weight: &Array<T, IxDyn>, x_flat: &Array<T, IxDyn>) -> Array1<T>
where
    T: Float,
{
    let n = x_flat.shape()[0];
    let p = x_flat.shape()[1];
    let w_flat: Vec<T> = weight.iter().cloned().collect();

    let mut predictions = Array1::<T>::zeros(n);
    for i in 0..n {
        let mut sum = T::zero();
        for (j, &w) in w_flat.iter().enumerate().take(p) {
            sum = sum + x_flat[[i, j]] * w;
        }
        predictions[i] = sum;
    }

    predictions
}
