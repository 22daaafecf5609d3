//! Vanilla option definitions.

use super::error::InstrumentError;
use super::payoff::PayoffType;

/// Vanilla option instrument.
///
/// Holds the contract terms shared by the analytical formulas and the Monte
/// Carlo engine: strike, time to expiry (year fraction) and payoff type.
/// Exercise style is decided by the pricing routine, not the contract: the
/// same instrument prices as European through the closed form and as
/// American through the LSM engine.
///
/// # Examples
/// ```
/// use lsm_models::instruments::{PayoffType, VanillaOption};
///
/// let put = VanillaOption::new(1.1, 3.0, PayoffType::Put).unwrap();
/// assert_eq!(put.intrinsic(0.92), 1.1 - 0.92);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VanillaOption {
    strike: f64,
    expiry: f64,
    payoff_type: PayoffType,
}

impl VanillaOption {
    /// Creates a new vanilla option.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive and finite)
    /// * `expiry` - Time to expiry in years (must be non-negative and finite)
    /// * `payoff_type` - Call or put
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if strike ≤ 0 or non-finite
    /// - `InstrumentError::InvalidExpiry` if expiry < 0 or non-finite
    pub fn new(
        strike: f64,
        expiry: f64,
        payoff_type: PayoffType,
    ) -> Result<Self, InstrumentError> {
        if strike <= 0.0 || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if expiry < 0.0 || !expiry.is_finite() {
            return Err(InstrumentError::InvalidExpiry { expiry });
        }

        Ok(Self {
            strike,
            expiry,
            payoff_type,
        })
    }

    /// Convenience constructor for a call.
    pub fn call(strike: f64, expiry: f64) -> Result<Self, InstrumentError> {
        Self::new(strike, expiry, PayoffType::Call)
    }

    /// Convenience constructor for a put.
    pub fn put(strike: f64, expiry: f64) -> Result<Self, InstrumentError> {
        Self::new(strike, expiry, PayoffType::Put)
    }

    /// Returns the intrinsic payoff at the given spot.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.payoff_type.intrinsic(spot, self.strike)
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }
}
