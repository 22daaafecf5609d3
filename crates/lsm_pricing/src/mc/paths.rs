//! Path simulation under geometric Brownian motion.

use crate::rng::PathRng;

use super::error::LsmError;

/// Parameters of a geometric Brownian motion.
///
/// Plain parameter bag; validity is checked with [`GbmParams::is_valid`]
/// before simulation starts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial asset price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Simulation horizon in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates a new parameter set.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// Returns `true` if the parameters describe a simulable process.
    ///
    /// Requires a positive finite spot, a finite rate, a non-negative finite
    /// volatility and a positive finite maturity.
    pub fn is_valid(&self) -> bool {
        self.spot.is_finite()
            && self.spot > 0.0
            && self.rate.is_finite()
            && self.volatility.is_finite()
            && self.volatility >= 0.0
            && self.maturity.is_finite()
            && self.maturity > 0.0
    }
}

/// Matrix of simulated asset price paths.
///
/// Stored row-major: path `p` occupies `n_steps + 1` contiguous values, with
/// column 0 holding the spot and column `s` the price at the `s`-th time
/// step. Row-major layout keeps each path cache-local during the per-path
/// payoff scans of the backward induction.
#[derive(Clone, Debug)]
pub struct SamplePaths {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl SamplePaths {
    /// Simulates `n_paths` GBM paths of `n_steps` time steps each.
    ///
    /// Uses the exact log-normal transition over each step of length
    /// `maturity / n_steps`, so the discretisation introduces no bias for
    /// European payoffs.
    ///
    /// # Arguments
    ///
    /// * `params` - GBM parameters (assumed valid, see [`GbmParams::is_valid`])
    /// * `n_paths` - number of paths to simulate
    /// * `n_steps` - number of time steps per path
    /// * `rng` - seeded random number generator
    pub fn generate(
        params: &GbmParams,
        n_paths: usize,
        n_steps: usize,
        rng: &mut PathRng,
    ) -> Self {
        let dt = params.maturity / n_steps as f64;
        let drift = (params.rate - 0.5 * params.volatility * params.volatility) * dt;
        let diffusion = params.volatility * dt.sqrt();

        let width = n_steps + 1;
        let mut data = vec![0.0; n_paths * width];

        for p in 0..n_paths {
            let row = &mut data[p * width..(p + 1) * width];
            row[0] = params.spot;
            let mut price = params.spot;
            for cell in row.iter_mut().skip(1) {
                let z = rng.gen_normal();
                price *= (drift + diffusion * z).exp();
                *cell = price;
            }
        }

        Self {
            data,
            n_paths,
            n_steps,
        }
    }

    /// Simulates `n_paths` GBM paths in antithetic pairs.
    ///
    /// Path `p` in the first half uses draws `z`; its mirror at
    /// `p + n_paths / 2` reuses the same draws negated. The caller must pass
    /// an even `n_paths` (enforced by the configuration layer); an odd count
    /// would leave an unpaired row unfilled.
    pub fn generate_antithetic(
        params: &GbmParams,
        n_paths: usize,
        n_steps: usize,
        rng: &mut PathRng,
    ) -> Self {
        debug_assert!(
            n_paths % 2 == 0,
            "antithetic generation requires an even path count, got {n_paths}"
        );
        let dt = params.maturity / n_steps as f64;
        let drift = (params.rate - 0.5 * params.volatility * params.volatility) * dt;
        let diffusion = params.volatility * dt.sqrt();

        let width = n_steps + 1;
        let half = n_paths / 2;
        let mut data = vec![0.0; n_paths * width];
        let mut draws = vec![0.0; n_steps];

        for p in 0..half {
            rng.fill_normal(&mut draws);

            let mut price = params.spot;
            let mut mirror = params.spot;
            data[p * width] = params.spot;
            data[(p + half) * width] = params.spot;

            for (s, &z) in draws.iter().enumerate() {
                price *= (drift + diffusion * z).exp();
                mirror *= (drift - diffusion * z).exp();
                data[p * width + s + 1] = price;
                data[(p + half) * width + s + 1] = mirror;
            }
        }

        Self {
            data,
            n_paths,
            n_steps,
        }
    }

    /// Builds a path matrix from externally supplied rows.
    ///
    /// Each row holds `n_steps + 1` prices starting with the spot. Intended
    /// for pricing against paths produced elsewhere and for fixture-driven
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::EmptyPaths`] if there are no rows or the rows
    /// carry no time steps, and [`LsmError::ShapeMismatch`] if the rows have
    /// inconsistent lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, LsmError> {
        let first = rows.first().ok_or(LsmError::EmptyPaths)?;
        if first.len() < 2 {
            return Err(LsmError::EmptyPaths);
        }
        let width = first.len();

        for row in rows {
            if row.len() != width {
                return Err(LsmError::ShapeMismatch {
                    expected_paths: rows.len(),
                    expected_steps: width - 1,
                    actual_paths: rows.len(),
                    actual_steps: row.len().saturating_sub(1),
                });
            }
        }

        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            n_paths: rows.len(),
            n_steps: width - 1,
        })
    }

    /// Returns the number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path (excluding the spot column).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the price of path `p` at time step `s`, where `s = 0` is the
    /// spot and `s = n_steps` the terminal price.
    #[inline]
    pub fn price(&self, p: usize, s: usize) -> f64 {
        self.data[p * (self.n_steps + 1) + s]
    }
}
