//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::{PayoffType, VanillaOption};

/// Expiries below this threshold collapse to intrinsic value.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Black-Scholes model for European option pricing.
///
/// Provides closed-form prices under lognormal dynamics. Used as the
/// reference the Monte Carlo estimates are validated against.
///
/// # Examples
/// ```
/// use lsm_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if spot <= 0.0 || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if volatility <= 0.0 || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Returns large positive/negative values in the expiry → 0 limit so the
    /// price formulas degrade to intrinsic value.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return if self.spot > strike {
                100.0
            } else if self.spot < strike {
                -100.0
            } else {
                0.0
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return self.d1(strike, expiry);
        }

        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return (self.spot - strike).max(0.0);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// Computes the European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return (strike - self.spot).max(0.0);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// Prices a vanilla option, dispatching on its payoff type.
    ///
    /// European exercise is assumed; American contracts priced through this
    /// formula yield the lower bound the LSM estimate must dominate.
    #[inline]
    pub fn price(&self, option: &VanillaOption) -> f64 {
        match option.payoff_type() {
            PayoffType::Call => self.price_call(option.strike(), option.expiry()),
            PayoffType::Put => self.price_put(option.strike(), option.expiry()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn standard_model() -> BlackScholes {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            BlackScholes::new(-100.0, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0, 0.05, 0.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_atm_call_known_value() {
        // S=100, K=100, r=0.05, sigma=0.2, T=1: C ≈ 10.4506
        let bs = standard_model();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_atm_put_known_value() {
        // Same parameters: P ≈ 5.5735
        let bs = standard_model();
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_put_call_parity() {
        let bs = standard_model();
        for strike in [80.0, 100.0, 120.0] {
            let call = bs.price_call(strike, 1.0);
            let put = bs.price_put(strike, 1.0);
            let forward = 100.0 - strike * (-0.05_f64).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_expiry_zero_returns_intrinsic() {
        let bs = standard_model();
        assert_relative_eq!(bs.price_call(90.0, 0.0), 10.0);
        assert_relative_eq!(bs.price_put(110.0, 0.0), 10.0);
        assert_eq!(bs.price_call(110.0, 0.0), 0.0);
    }

    #[test]
    fn test_price_dispatches_on_payoff_type() {
        let bs = standard_model();
        let call = VanillaOption::call(100.0, 1.0).unwrap();
        let put = VanillaOption::put(100.0, 1.0).unwrap();

        assert_relative_eq!(bs.price(&call), bs.price_call(100.0, 1.0));
        assert_relative_eq!(bs.price(&put), bs.price_put(100.0, 1.0));
    }

    #[test]
    fn test_deep_itm_put_near_discounted_intrinsic() {
        // Deep in-the-money European put approaches K*exp(-rT) - S.
        let bs = standard_model();
        let price = bs.price_put(300.0, 1.0);
        let bound = 300.0 * (-0.05_f64).exp() - 100.0;
        assert_relative_eq!(price, bound, epsilon = 1e-2);
    }
}
