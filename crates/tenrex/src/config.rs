//! Fit configuration for the ALS regression engine

/// Configuration for alternating least squares fitting
///
/// Controls convergence, regularization, and reproducibility of the
/// optimization loop. The defaults match the reference calibration used by
/// the integration tests.
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    /// Convergence tolerance on the relative decrease of training RMSE
    pub tol: f64,

    /// Maximum number of ALS sweeps
    pub n_iter_max: usize,

    /// Ridge regularization strength (λ ≥ 0) applied to every subproblem
    pub reg_w: f64,

    /// Seed for the factor initialization RNG
    pub init_seed: u64,

    /// Emit per-sweep progress via `tracing` at info level
    pub verbose: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            tol: 1e-7,
            n_iter_max: 100,
            reg_w: 1.0,
            init_seed: 0,
            verbose: false,
        }
    }
}

impl FitConfig {
    /// Create a configuration with a specific regularization strength
    pub fn regularized(reg_w: f64) -> Self {
        Self {
            reg_w,
            ..Default::default()
        }
    }

    /// Create a configuration with a specific initialization seed
    pub fn seeded(init_seed: u64) -> Self {
        Self {
            init_seed,
            ..Default::default()
        }
    }
}
