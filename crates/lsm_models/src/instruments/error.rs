//! Instrument error types.

use thiserror::Error;

/// Instrument validation errors.
///
/// Raised by [`VanillaOption::new`](super::VanillaOption::new) when contract
/// terms are rejected before any pricing work begins.
///
/// # Examples
/// ```
/// use lsm_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -1.1 };
/// assert!(format!("{}", err).contains("-1.1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive or non-finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry time (negative or non-finite).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },
}
