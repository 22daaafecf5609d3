//! Instrument definitions.
//!
//! This module provides the vanilla option contract and its payoff types.

mod error;
mod payoff;
mod vanilla;

pub use error::InstrumentError;
pub use payoff::PayoffType;
pub use vanilla::VanillaOption;
