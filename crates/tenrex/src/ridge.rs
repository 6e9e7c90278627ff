//! Ridge-regularized least squares solver
//!
//! Every ALS subproblem reduces to minimizing ||D w - y||² + λ||w||², which
//! we solve through the normal equations (DᵀD + λI) w = Dᵀy. The normal
//! system is (p, p) with p the number of free coefficients in the current
//! block, so forming it explicitly is much cheaper than factorizing the tall
//! (N, p) design.

use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use scirs2_linalg::lstsq;
use std::iter::Sum;

use crate::error::RegressionResult;

/// Solve (DᵀD + λI) w = Dᵀy for w
pub(crate) fn ridge_solve<T>(
    design: &ArrayView2<T>,
    y: &ArrayView1<T>,
    reg: T,
) -> RegressionResult<Array1<T>>
where
    T: Float + NumAssign + Sum + ScalarOperand + Send + Sync + 'static,
{
    let (n, p) = (design.shape()[0], design.shape()[1]);

    // Gram matrix DᵀD, filled symmetrically
    let mut gram = Array2::<T>::zeros((p, p));
    for i in 0..p {
        for j in i..p {
            let mut sum = T::zero();
            for k in 0..n {
                sum = sum + design[[k, i]] * design[[k, j]];
            }
            gram[[i, j]] = sum;
            gram[[j, i]] = sum;
        }
    }

    for i in 0..p {
        gram[[i, i]] += reg;
    }

    // Right-hand side Dᵀy
    let mut rhs = Array1::<T>::zeros(p);
    for i in 0..p {
        let mut sum = T::zero();
        for k in 0..n {
            sum = sum + design[[k, i]] * y[k];
        }
        rhs[i] = sum;
    }

    let solution = lstsq(&gram.view(), &rhs.view(), None)?;
    Ok(solution.x)
}
