//! Cross-sectional continuation-value regression.
//!
//! At each exercise date the engine fits a quadratic polynomial in the asset
//! price to the realised discounted future cash flows of the in-the-money
//! paths, by ordinary least squares on the basis {1, x, x^2}.

use nalgebra::{Matrix3, Vector3};

/// Fitted quadratic continuation-value function.
///
/// Evaluates `intercept + linear * x + quadratic * x^2`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuationFit {
    /// Constant coefficient.
    pub intercept: f64,
    /// Coefficient of `x`.
    pub linear: f64,
    /// Coefficient of `x^2`.
    pub quadratic: f64,
}

impl ContinuationFit {
    /// Constant fit, used as the degenerate fallback when the normal
    /// equations cannot be solved.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Self {
            intercept: value,
            linear: 0.0,
            quadratic: 0.0,
        }
    }

    /// Evaluates the fitted polynomial at `x`.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.intercept + self.linear * x + self.quadratic * x * x
    }
}

/// Fits the continuation value by quadratic least squares.
///
/// Solves the 3x3 normal equations built from the power sums of `x`. The
/// system is tiny, so an LU decomposition of the moment matrix is cheaper
/// than a general QR over the design matrix and accurate enough at the
/// scale of typical price levels.
///
/// Degenerate inputs never fail: with fewer than three observations, or
/// fewer than three distinct `x` levels (which makes the moment matrix
/// singular), the fit falls back to the constant function at the mean of
/// `y`. Pricing then reduces to
/// comparing intrinsic value against that average, which is the correct
/// limit of the regression.
///
/// `x` and `y` must have equal length; excess elements of the longer slice
/// are ignored.
pub fn fit_continuation(x: &[f64], y: &[f64]) -> ContinuationFit {
    let n = x.len().min(y.len());
    if n == 0 {
        return ContinuationFit::constant(0.0);
    }

    let mean_y = y[..n].iter().sum::<f64>() / n as f64;
    if n < 3 || distinct_levels(&x[..n]) < 3 {
        return ContinuationFit::constant(mean_y);
    }

    // Power sums of x up to x^4 and cross moments with y.
    let mut s1 = 0.0;
    let mut s2 = 0.0;
    let mut s3 = 0.0;
    let mut s4 = 0.0;
    let mut sy = 0.0;
    let mut sxy = 0.0;
    let mut sx2y = 0.0;

    for (&xi, &yi) in x[..n].iter().zip(&y[..n]) {
        let xi2 = xi * xi;
        s1 += xi;
        s2 += xi2;
        s3 += xi2 * xi;
        s4 += xi2 * xi2;
        sy += yi;
        sxy += xi * yi;
        sx2y += xi2 * yi;
    }

    let s0 = n as f64;
    let moments = Matrix3::new(s0, s1, s2, s1, s2, s3, s2, s3, s4);
    let rhs = Vector3::new(sy, sxy, sx2y);

    match moments.lu().solve(&rhs) {
        Some(beta) if beta.iter().all(|b| b.is_finite()) => ContinuationFit {
            intercept: beta[0],
            linear: beta[1],
            quadratic: beta[2],
        },
        _ => ContinuationFit::constant(mean_y),
    }
}

/// Number of distinct values in `x`, counted up to 3.
///
/// The rank of the {1, x, x^2} design matrix equals the number of distinct
/// regressor values (capped at 3), so the normal equations are singular
/// exactly when this returns less than 3. Partial-pivot LU can return
/// finite garbage for such a matrix, which makes an explicit rank check
/// mandatory rather than relying on the solver.
fn distinct_levels(x: &[f64]) -> usize {
    let mut values = x.iter().copied();
    let first = match values.next() {
        Some(v) => v,
        None => return 0,
    };
    let mut second = None;
    for xi in values {
        if xi != first {
            match second {
                None => second = Some(xi),
                Some(s) if xi != s => return 3,
                Some(_) => {}
            }
        }
    }
    if second.is_some() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_exact_quadratic_recovery() {
        // y = 2 - 3x + 0.5x^2 sampled without noise must be recovered exactly.
        let x: Vec<f64> = (0..20).map(|i| 0.5 + 0.1 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&xi| 2.0 - 3.0 * xi + 0.5 * xi * xi).collect();

        let fit = fit_continuation(&x, &y);
        assert_relative_eq!(fit.intercept, 2.0, epsilon = 1e-8);
        assert_relative_eq!(fit.linear, -3.0, epsilon = 1e-8);
        assert_relative_eq!(fit.quadratic, 0.5, epsilon = 1e-8);
    }

    #[test]
    fn test_evaluate() {
        let fit = ContinuationFit {
            intercept: 1.0,
            linear: 2.0,
            quadratic: 3.0,
        };
        assert_relative_eq!(fit.evaluate(2.0), 1.0 + 4.0 + 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_fit() {
        let fit = ContinuationFit::constant(4.2);
        assert_relative_eq!(fit.evaluate(-17.0), 4.2, epsilon = 1e-12);
        assert_relative_eq!(fit.evaluate(123.0), 4.2, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_points_falls_back_to_mean() {
        let fit = fit_continuation(&[1.0, 2.0], &[10.0, 20.0]);
        assert_relative_eq!(fit.evaluate(5.0), 15.0, epsilon = 1e-12);
        assert_eq!(fit.linear, 0.0);
        assert_eq!(fit.quadratic, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let fit = fit_continuation(&[], &[]);
        assert_eq!(fit, ContinuationFit::constant(0.0));
    }

    #[test]
    fn test_identical_x_falls_back_to_mean() {
        // All x equal makes the moment matrix rank one.
        let x = vec![1.5; 10];
        let y: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let fit = fit_continuation(&x, &y);
        assert_relative_eq!(fit.evaluate(1.5), 4.5, epsilon = 1e-9);
        assert_eq!(fit.linear, 0.0);
        assert_eq!(fit.quadratic, 0.0);
    }

    #[test]
    fn test_two_price_levels_fall_back_to_mean() {
        // Two distinct x levels leave the normal equations rank two.
        let x = vec![1.0, 1.0, 2.0, 2.0];
        let y = vec![3.0, 5.0, 7.0, 9.0];
        let fit = fit_continuation(&x, &y);
        assert_eq!(fit, ContinuationFit::constant(6.0));
    }

    #[test]
    fn test_worked_regression_from_longstaff_schwartz() {
        // Year-two regression from the classic eight-path example:
        // E[Y|X] ~ -1.070 + 2.983 X - 1.813 X^2.
        let x = vec![1.08, 1.07, 0.97, 0.77, 0.84];
        let df = (-0.06f64).exp();
        let y = vec![0.00, 0.07 * df, 0.18 * df, 0.20 * df, 0.09 * df];

        let fit = fit_continuation(&x, &y);
        assert_relative_eq!(fit.intercept, -1.070, epsilon = 5e-3);
        assert_relative_eq!(fit.linear, 2.983, epsilon = 5e-3);
        assert_relative_eq!(fit.quadratic, -1.813, epsilon = 5e-3);
    }

    proptest! {
        #[test]
        fn prop_fit_is_finite(
            points in prop::collection::vec((0.1f64..200.0, -50.0f64..50.0), 3..64)
        ) {
            let x: Vec<f64> = points.iter().map(|p| p.0).collect();
            let y: Vec<f64> = points.iter().map(|p| p.1).collect();
            let fit = fit_continuation(&x, &y);
            prop_assert!(fit.intercept.is_finite());
            prop_assert!(fit.linear.is_finite());
            prop_assert!(fit.quadratic.is_finite());
        }

        #[test]
        fn prop_constant_data_fits_constant(
            c in -100.0f64..100.0,
            x in prop::collection::vec(0.1f64..200.0, 3..32)
        ) {
            let y = vec![c; x.len()];
            let fit = fit_continuation(&x, &y);
            // A constant target is reproduced at every sample point.
            for &xi in &x {
                prop_assert!((fit.evaluate(xi) - c).abs() < 1e-5);
            }
        }
    }
}
