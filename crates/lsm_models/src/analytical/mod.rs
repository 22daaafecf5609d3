//! Analytical pricing formulas.
//!
//! Closed-form European option prices used to validate Monte Carlo output.

mod black_scholes;
pub mod distributions;
mod error;

pub use black_scholes::BlackScholes;
pub use error::AnalyticalError;
