//! Regression metrics
//!
//! Mean squared error and root mean squared error over paired response
//! vectors. Both reject empty or mismatched inputs.

use scirs2_core::ndarray_ext::ArrayView1;
use scirs2_core::numeric::{Float, NumCast};
use std::iter::Sum;

use crate::error::{RegressionError, RegressionResult};

/// Compute the mean squared error between two response vectors
pub fn mse<T>(y_true: &ArrayView1<T>, y_pred: &ArrayView1<T>) -> RegressionResult<T>
where
    T: Float + Sum,
{
    if y_true.len() != y_pred.len() {
        return Err(RegressionError::ShapeMismatch(format!(
            "response lengths differ: {} vs {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    if y_true.is_empty() {
        return Err(RegressionError::ShapeMismatch(
            "empty response vectors".to_string(),
        ));
    }

    let sum_sq: T = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let diff = t - p;
            diff * diff
        })
        .sum();

    let n: T = NumCast::from(y_true.len()).unwrap();
    Ok(sum_sq / n)
}

/// Compute the root mean squared error between two response vectors
pub fn rmse<T>(y_true: &ArrayView1<T>, y_pred: &ArrayView1<T>) -> RegressionResult<T>
where
    T: Float + Sum,
{
    Ok(mse(y_true, y_pred)?.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::{array, Array1};

    #[test]
    fn test_mse_hand_computed() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![0.0, 2.0, 4.0];

        // Squared errors: 1, 0, 1; mean = 2/3
        let result = mse(&y_true.view(), &y_pred.view()).unwrap();
        assert!((result - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_hand_computed() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![0.0, 2.0, 4.0];

        let result = rmse(&y_true.view(), &y_pred.view()).unwrap();
        assert!((result - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_prediction() {
        let y = array![1.5, -2.0, 0.25];
        assert_eq!(mse(&y.view(), &y.view()).unwrap(), 0.0);
        assert_eq!(rmse(&y.view(), &y.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let y_true = array![1.0, 2.0];
        let y_pred = array![1.0, 2.0, 3.0];

        let result = mse(&y_true.view(), &y_pred.view());
        assert!(matches!(result, Err(RegressionError::ShapeMismatch(_))));
    }

    #[test]
    fn test_empty_input() {
        let y_true = Array1::<f64>::zeros(0);
        let y_pred = Array1::<f64>::zeros(0);

        let result = mse(&y_true.view(), &y_pred.view());
        assert!(matches!(result, Err(RegressionError::ShapeMismatch(_))));
    }
}
