//! Payoff type definitions.
//!
//! This module provides the call/put payoff variants and their intrinsic
//! (immediate-exercise) values.

/// Type of option payoff.
///
/// Selects one of two intrinsic payoff functions. No smoothing is applied:
/// the LSM recursion compares raw intrinsic values against fitted
/// continuation values, so the payoff must be exact at the kink.
///
/// # Variants
/// - `Call`: max(S − K, 0)
/// - `Put`: max(K − S, 0)
///
/// # Examples
/// ```
/// use lsm_models::instruments::PayoffType;
///
/// let put = PayoffType::Put;
/// assert_eq!(put.intrinsic(0.97, 1.1), 1.1 - 0.97);
/// assert_eq!(put.intrinsic(1.26, 1.1), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffType {
    /// Call option: max(S − K, 0)
    Call,
    /// Put option: max(K − S, 0)
    Put,
}

impl PayoffType {
    /// Evaluates the intrinsic payoff for given spot and strike.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (S)
    /// * `strike` - Strike price (K)
    ///
    /// # Returns
    /// The immediate-exercise value, always non-negative.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            PayoffType::Call => (spot - strike).max(0.0),
            PayoffType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns whether this payoff is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this payoff is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }
}
