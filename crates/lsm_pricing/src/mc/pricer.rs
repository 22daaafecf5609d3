//! Top-level Longstaff-Schwartz pricer.

use lsm_models::instruments::VanillaOption;
use rayon::prelude::*;

use crate::rng::PathRng;

use super::config::LsmConfig;
use super::error::LsmError;
use super::induction::{run_backward_induction, LsmOutcome};
use super::paths::{GbmParams, SamplePaths};

/// Offset between consecutive batch seeds (64-bit golden ratio).
const BATCH_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Tolerance for agreement between option expiry and simulation horizon.
const MATURITY_EPSILON: f64 = 1e-9;

/// Point estimate and sampling error of a Monte Carlo price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Estimated option price.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
}

impl PricingResult {
    /// 95% confidence interval around the estimate.
    #[inline]
    pub fn confidence_95(&self) -> (f64, f64) {
        let half_width = 1.96 * self.std_error;
        (self.price - half_width, self.price + half_width)
    }

    /// 99% confidence interval around the estimate.
    #[inline]
    pub fn confidence_99(&self) -> (f64, f64) {
        let half_width = 2.576 * self.std_error;
        (self.price - half_width, self.price + half_width)
    }
}

/// Sample mean and standard error of the mean.
///
/// Returns a zero standard error for fewer than two values.
fn mean_and_stderr(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / (n - 1) as f64;
    (mean, (variance / n as f64).sqrt())
}

/// Least-squares Monte Carlo pricer for American and European vanilla
/// options under geometric Brownian motion.
///
/// Holds only the simulation configuration; each pricing call simulates its
/// own paths, so a pricer can be shared freely across instruments. Batches
/// are independent replicates priced in parallel with deterministic per-batch
/// seeds; the backward recursion inside each batch stays sequential.
///
/// # Examples
///
/// ```rust
/// use lsm_models::instruments::VanillaOption;
/// use lsm_pricing::mc::{GbmParams, LsmConfig, LsmPricer};
///
/// let config = LsmConfig::builder()
///     .n_paths(20_000)
///     .n_steps(50)
///     .n_batches(4)
///     .seed(7)
///     .build()
///     .unwrap();
/// let pricer = LsmPricer::new(config).unwrap();
///
/// let gbm = GbmParams::new(36.0, 0.06, 0.2, 1.0);
/// let put = VanillaOption::put(40.0, 1.0).unwrap();
/// let result = pricer.price_american(gbm, &put).unwrap();
/// assert!(result.price > 4.0);
/// ```
#[derive(Clone, Debug)]
pub struct LsmPricer {
    config: LsmConfig,
}

impl LsmPricer {
    /// Creates a pricer from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::Config`] if the configuration is invalid.
    pub fn new(config: LsmConfig) -> Result<Self, LsmError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &LsmConfig {
        &self.config
    }

    /// Prices an American-style option by simulation and backward induction.
    ///
    /// Simulates `n_batches` independent path matrices and averages their
    /// batch prices. With several batches the standard error is estimated
    /// from the dispersion of batch prices; with a single batch it falls
    /// back to the per-path standard error.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::InvalidModel`] if the GBM parameters are not
    /// simulable or the option expiry disagrees with the simulation horizon.
    pub fn price_american(
        &self,
        gbm: GbmParams,
        option: &VanillaOption,
    ) -> Result<PricingResult, LsmError> {
        self.validate_model(&gbm, option)?;
        let dt = gbm.maturity / self.config.n_steps() as f64;

        self.run_batches(&gbm, |paths| {
            let outcome = run_backward_induction(paths, option, gbm.rate)?;
            Ok(outcome.cash_flows.discounted_path_values(gbm.rate, dt))
        })
    }

    /// Prices an American-style option against an externally supplied path
    /// matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::ShapeMismatch`] if the matrix dimensions disagree
    /// with the configuration.
    pub fn price_american_from_paths(
        &self,
        paths: &SamplePaths,
        option: &VanillaOption,
        rate: f64,
    ) -> Result<PricingResult, LsmError> {
        self.check_shape(paths)?;
        let dt = option.expiry() / paths.n_steps() as f64;

        let outcome = run_backward_induction(paths, option, rate)?;
        let values = outcome.cash_flows.discounted_path_values(rate, dt);
        let (price, std_error) = mean_and_stderr(&values);
        Ok(PricingResult { price, std_error })
    }

    /// Prices the European counterpart: payoff only at expiry, no early
    /// exercise.
    ///
    /// Useful as a control variate check, since the Monte Carlo estimate
    /// must agree with the Black-Scholes closed form within sampling error.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::InvalidModel`] under the same conditions as
    /// [`LsmPricer::price_american`].
    pub fn price_european(
        &self,
        gbm: GbmParams,
        option: &VanillaOption,
    ) -> Result<PricingResult, LsmError> {
        self.validate_model(&gbm, option)?;
        let discount = (-gbm.rate * gbm.maturity).exp();

        self.run_batches(&gbm, |paths| {
            let n_steps = paths.n_steps();
            Ok((0..paths.n_paths())
                .map(|p| option.intrinsic(paths.price(p, n_steps)) * discount)
                .collect())
        })
    }

    /// Prices the European counterpart against an externally supplied path
    /// matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::ShapeMismatch`] if the matrix dimensions disagree
    /// with the configuration.
    pub fn price_european_from_paths(
        &self,
        paths: &SamplePaths,
        option: &VanillaOption,
        rate: f64,
    ) -> Result<PricingResult, LsmError> {
        self.check_shape(paths)?;
        let n_steps = paths.n_steps();
        let discount = (-rate * option.expiry()).exp();

        let values: Vec<f64> = (0..paths.n_paths())
            .map(|p| option.intrinsic(paths.price(p, n_steps)) * discount)
            .collect();
        let (price, std_error) = mean_and_stderr(&values);
        Ok(PricingResult { price, std_error })
    }

    /// Runs the backward induction on a supplied path matrix and returns the
    /// full outcome, including per-date regression diagnostics and the final
    /// cash-flow state.
    ///
    /// # Errors
    ///
    /// Returns [`LsmError::ShapeMismatch`] if the matrix dimensions disagree
    /// with the configuration.
    pub fn diagnose_from_paths(
        &self,
        paths: &SamplePaths,
        option: &VanillaOption,
        rate: f64,
    ) -> Result<LsmOutcome, LsmError> {
        self.check_shape(paths)?;
        run_backward_induction(paths, option, rate)
    }

    /// Simulates all batches in parallel and aggregates the per-path values
    /// produced by `value_paths` into a pooled estimate.
    fn run_batches<F>(&self, gbm: &GbmParams, value_paths: F) -> Result<PricingResult, LsmError>
    where
        F: Fn(&SamplePaths) -> Result<Vec<f64>, LsmError> + Sync,
    {
        let base_seed = self.config.seed().unwrap_or_else(rand::random::<u64>);
        let n_batches = self.config.n_batches();

        let batch_stats: Vec<(f64, f64)> = (0..n_batches)
            .into_par_iter()
            .map(|batch| {
                let seed =
                    base_seed.wrapping_add((batch as u64).wrapping_mul(BATCH_SEED_STRIDE));
                let mut rng = PathRng::from_seed(seed);
                let paths = self.simulate(gbm, &mut rng);
                let values = value_paths(&paths)?;
                Ok(mean_and_stderr(&values))
            })
            .collect::<Result<_, LsmError>>()?;

        if n_batches == 1 {
            let (price, std_error) = batch_stats[0];
            return Ok(PricingResult { price, std_error });
        }

        let means: Vec<f64> = batch_stats.iter().map(|s| s.0).collect();
        let (price, std_error) = mean_and_stderr(&means);
        Ok(PricingResult { price, std_error })
    }

    fn simulate(&self, gbm: &GbmParams, rng: &mut PathRng) -> SamplePaths {
        if self.config.antithetic() {
            SamplePaths::generate_antithetic(
                gbm,
                self.config.n_paths(),
                self.config.n_steps(),
                rng,
            )
        } else {
            SamplePaths::generate(gbm, self.config.n_paths(), self.config.n_steps(), rng)
        }
    }

    fn validate_model(&self, gbm: &GbmParams, option: &VanillaOption) -> Result<(), LsmError> {
        if !gbm.is_valid() {
            return Err(LsmError::InvalidModel {
                message: format!(
                    "GBM parameters not simulable: spot={}, rate={}, volatility={}, maturity={}",
                    gbm.spot, gbm.rate, gbm.volatility, gbm.maturity
                ),
            });
        }
        if (option.expiry() - gbm.maturity).abs() > MATURITY_EPSILON {
            return Err(LsmError::InvalidModel {
                message: format!(
                    "option expiry {} does not match simulation horizon {}",
                    option.expiry(),
                    gbm.maturity
                ),
            });
        }
        Ok(())
    }

    fn check_shape(&self, paths: &SamplePaths) -> Result<(), LsmError> {
        if paths.n_paths() != self.config.n_paths() || paths.n_steps() != self.config.n_steps() {
            return Err(LsmError::ShapeMismatch {
                expected_paths: self.config.n_paths(),
                expected_steps: self.config.n_steps(),
                actual_paths: paths.n_paths(),
                actual_steps: paths.n_steps(),
            });
        }
        Ok(())
    }
}
