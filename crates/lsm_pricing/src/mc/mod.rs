//! Least-squares Monte Carlo pricing engine.
//!
//! Implements the Longstaff-Schwartz algorithm: simulate asset price paths,
//! then walk backwards through the exercise dates, at each date regressing
//! realised discounted future cash flow on the current asset price over the
//! in-the-money paths to estimate the value of continuation. Exercise happens
//! where immediate exercise beats the fitted continuation value, and each
//! path exercises at most once.
//!
//! Entry point is [`LsmPricer`]; the intermediate stages are public for
//! diagnostics and testing.

mod cashflow;
mod config;
mod error;
mod induction;
mod paths;
mod pricer;
mod regression;

pub use cashflow::CashFlowState;
pub use config::{LsmConfig, LsmConfigBuilder, MAX_BATCHES, MAX_PATHS, MAX_STEPS};
pub use error::{ConfigError, LsmError};
pub use induction::{run_backward_induction, LsmOutcome, StepRegression};
pub use paths::{GbmParams, SamplePaths};
pub use pricer::{LsmPricer, PricingResult};
pub use regression::{fit_continuation, ContinuationFit};
