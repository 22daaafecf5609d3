//! Random number generation infrastructure.
//!
//! Seeded, reproducible random number generation for Monte Carlo
//! simulation. Seeds are threaded explicitly through the path generator;
//! there is no ambient process-wide seeding.

mod prng;

pub use prng::PathRng;
