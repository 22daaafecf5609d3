//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function approximation using Horner's method.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which
/// provides maximum error of 1.5e-7 for all x.
#[inline]
fn erfc_approx(x: f64) -> f64 {
    // Abramowitz and Stegun constants (7.1.26)
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);

    // Horner's method for polynomial evaluation
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < 0.0 {
        2.0 - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) via Φ(x) = (1/2)·erfc(−x/√2).
///
/// # Accuracy
/// Accurate to at least 1e-7 for all finite x values.
///
/// # Examples
/// ```
/// use lsm_models::analytical::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc_approx(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function.
///
/// Computes φ(x) = (1/√(2π))·exp(−x²/2).
///
/// # Examples
/// ```
/// use lsm_models::analytical::distributions::norm_pdf;
///
/// let peak = norm_pdf(0.0);
/// assert!((peak - 0.39894228).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cdf_symmetry() {
        // Φ(x) + Φ(-x) = 1
        for x in [-3.0, -1.5, -0.5, 0.0, 0.5, 1.5, 3.0] {
            let sum = norm_cdf(x) + norm_cdf(-x);
            assert_relative_eq!(sum, 1.0, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_cdf_known_values() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-7);
        // Φ(1.96) ≈ 0.975 (95% two-sided quantile)
        assert_relative_eq!(norm_cdf(1.96), 0.975, epsilon = 1e-4);
        // Φ(-1.6448) ≈ 0.05
        assert_relative_eq!(norm_cdf(-1.6448536), 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_cdf_monotone() {
        let mut prev = norm_cdf(-5.0);
        let mut x = -5.0;
        while x < 5.0 {
            x += 0.25;
            let current = norm_cdf(x);
            assert!(current >= prev);
            prev = current;
        }
    }

    #[test]
    fn test_pdf_known_values() {
        assert_relative_eq!(norm_pdf(0.0), 0.3989422804014327, epsilon = 1e-12);
        // φ is even
        assert_relative_eq!(norm_pdf(1.3), norm_pdf(-1.3), epsilon = 1e-15);
    }

    #[test]
    fn test_cdf_tails() {
        assert!(norm_cdf(8.0) > 1.0 - 1e-7);
        assert!(norm_cdf(-8.0) < 1e-7);
    }
}
