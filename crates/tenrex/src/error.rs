//! Error types for the tensor regression engine

use scirs2_linalg::LinalgError;
use tenrex_kernels::KernelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegressionError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Numerical divergence after {iterations} iterations")]
    NumericalDivergence { iterations: usize },

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),
}

pub type RegressionResult<T> = Result<T, RegressionError>;
