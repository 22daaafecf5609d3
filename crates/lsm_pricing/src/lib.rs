//! # LSM Pricing Engine
//!
//! Least-squares Monte Carlo (Longstaff-Schwartz) pricing of American-style
//! options under geometric Brownian motion.
//!
//! The crate is organised around a single backward-induction recursion over
//! simulated price paths:
//!
//! ```text
//! LsmPricer
//! ├── LsmConfig          (paths, steps, batches, antithetic, seed)
//! ├── PathRng            (seeded random number generation)
//! ├── SamplePaths        (GBM path matrix, or externally supplied)
//! └── Backward induction
//!     ├── fit_continuation()   (quadratic OLS over in-the-money paths)
//!     ├── CashFlowState        (payoff/exercise matrices, discount sequence)
//!     └── run_backward_induction()
//! ```
//!
//! At each time step, working from the second-to-last exercise date back to
//! the first, the engine regresses realised discounted future cash flow on
//! the current asset price over in-the-money paths, compares the fitted
//! continuation value against immediate exercise, and updates the cash-flow
//! matrices under the exercise-at-most-once invariant. The time recursion is
//! strictly sequential; parallelism is applied only across independent
//! Monte Carlo batches.
//!
//! ## Usage Example
//!
//! ```rust
//! use lsm_models::instruments::VanillaOption;
//! use lsm_pricing::mc::{GbmParams, LsmConfig, LsmPricer};
//!
//! let config = LsmConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(50)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let pricer = LsmPricer::new(config).unwrap();
//! let gbm = GbmParams::new(100.0, 0.05, 0.2, 1.0);
//! let put = VanillaOption::put(100.0, 1.0).unwrap();
//!
//! let result = pricer.price_american(gbm, &put).unwrap();
//! println!("American put: {:.4} +/- {:.4}", result.price, result.std_error);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;
