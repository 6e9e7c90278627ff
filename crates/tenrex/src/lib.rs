//! # tenrex - Low-Rank Tensor Regression
//!
//! Regression of scalar responses against tensor-valued samples through a
//! low-rank weight tensor, fitted by alternating least squares with ridge
//! regularization.
//!
//! ## Overview
//!
//! The model is y_i ≈ ⟨X_i, W⟩ with samples X_i ∈ ℝ^(d₁ × ... × d_M) and a
//! structured weight tensor W. Two structures are provided:
//!
//! ### Kruskal (CP) weights
//!
//! A sum of R rank-1 terms:
//!
//! ```text
//! W ≈ Σᵣ f₁ᵣ ⊗ f₂ᵣ ⊗ ... ⊗ f_Mᵣ
//! ```
//!
//! with M·d·R free coefficients instead of d^M. Use when all modes interact
//! through the same components.
//!
//! ### Tucker weights
//!
//! A core tensor contracted with one factor matrix per mode:
//!
//! ```text
//! W ≈ G ×₁ F₁ ×₂ F₂ ... ×_M F_M
//! ```
//!
//! with per-mode ranks (r₁, ..., r_M). Use when modes need different ranks
//! or when cross-component interactions matter.
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::{Array, Array1, IxDyn};
//! use tenrex::{FitConfig, FitOutcome, KruskalRegressor};
//!
//! // Twenty samples of 3x4 tensor features
//! let x = Array::<f64, _>::ones(IxDyn(&[20, 3, 4]));
//! let y = Array1::<f64>::ones(20);
//!
//! let mut model = KruskalRegressor::new(1, FitConfig::regularized(0.01));
//! let outcome = model.fit(&x.view(), &y.view()).unwrap();
//! assert!(matches!(outcome, FitOutcome::Converged | FitOutcome::MaxIterReached));
//!
//! let predictions = model.predict(&x.view()).unwrap();
//! assert_eq!(predictions.len(), 20);
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`, random number
//! generation uses `scirs2_core::random`, and linear solves use
//! `scirs2_linalg`. Direct use of `ndarray`, `rand`, or `num-traits` is not
//! permitted.

#![deny(warnings)]

pub mod config;
pub mod cp;
pub mod error;
pub mod metrics;
pub mod regression;
mod ridge;
pub mod tucker;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use config::FitConfig;
pub use cp::CpWeights;
pub use error::{RegressionError, RegressionResult};
pub use metrics::{mse, rmse};
pub use regression::{FitOutcome, TensorRegressor, WeightModel};
pub use tucker::TuckerWeights;

/// Regressor with Kruskal-structured weights; the rank is a single
/// component count
pub type KruskalRegressor<T> = TensorRegressor<T, CpWeights<T>>;

/// Regressor with Tucker-structured weights; the rank is one entry per
/// feature mode
pub type TuckerRegressor<T> = TensorRegressor<T, TuckerWeights<T>>;
