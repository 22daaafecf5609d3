//! # LSM Models
//!
//! Instrument definitions and analytical reference formulas for the
//! least-squares Monte Carlo (LSM) American option pricer.
//!
//! This crate provides:
//! - Vanilla option instruments with call/put intrinsic payoffs
//! - Closed-form Black-Scholes prices for European options
//! - Standard normal distribution helpers
//!
//! The analytical formulas exist to validate Monte Carlo output: an American
//! option priced by the LSM engine must never be worth less than its
//! European counterpart, and in the European limit the Monte Carlo estimate
//! must converge to the closed form within sampling error.
//!
//! ## Design Principles
//!
//! - **Enum-based payoffs** for static dispatch: "call" vs "put" is a tagged
//!   variant selecting one of two payoff functions, not a class hierarchy
//! - **Fallible constructors** so invalid contracts are rejected before any
//!   simulation starts

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;

pub use analytical::{AnalyticalError, BlackScholes};
pub use instruments::{InstrumentError, PayoffType, VanillaOption};
