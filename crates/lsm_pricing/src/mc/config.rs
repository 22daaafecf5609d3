//! Simulation configuration.
//!
//! Configuration types and builder for LSM Monte Carlo pricing runs.
//! A configuration is immutable once pricing begins.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of independent Monte Carlo batches.
pub const MAX_BATCHES: usize = 10_000;

/// LSM simulation configuration.
///
/// Use [`LsmConfig::builder`] to construct instances; validation happens at
/// build time so a constructed configuration is always usable.
///
/// # Examples
///
/// ```rust
/// use lsm_pricing::mc::LsmConfig;
///
/// let config = LsmConfig::builder()
///     .n_paths(10_000)
///     .n_steps(50)
///     .n_batches(8)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_batches(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct LsmConfig {
    /// Number of simulation paths per batch.
    n_paths: usize,
    /// Number of exercise dates per path.
    n_steps: usize,
    /// Number of independent batches (replicates).
    n_batches: usize,
    /// Whether paths are generated in antithetic pairs.
    antithetic: bool,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl LsmConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LsmConfigBuilder {
        LsmConfigBuilder::default()
    }

    /// Returns the number of simulation paths per batch.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of exercise dates per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of independent batches.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_batches
    }

    /// Returns whether antithetic pairing is enabled.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than [`MAX_PATHS`]
    /// - `n_steps` is 0 or greater than [`MAX_STEPS`]
    /// - `n_batches` is 0 or greater than [`MAX_BATCHES`]
    /// - antithetic pairing is requested with an odd `n_paths`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.n_batches == 0 || self.n_batches > MAX_BATCHES {
            return Err(ConfigError::InvalidBatchCount(self.n_batches));
        }
        if self.antithetic && self.n_paths % 2 != 0 {
            return Err(ConfigError::OddAntitheticPaths(self.n_paths));
        }
        Ok(())
    }
}

/// Builder for [`LsmConfig`].
///
/// # Examples
///
/// ```rust
/// use lsm_pricing::mc::LsmConfig;
///
/// let config = LsmConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)
///     .antithetic(true)
///     .seed(12345)
///     .build()
///     .expect("valid config");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LsmConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    n_batches: Option<usize>,
    antithetic: bool,
    seed: Option<u64>,
}

impl LsmConfigBuilder {
    /// Sets the number of simulation paths per batch.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of exercise dates per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the number of independent batches (defaults to 1).
    #[inline]
    pub fn n_batches(mut self, n_batches: usize) -> Self {
        self.n_batches = Some(n_batches);
        self
    }

    /// Enables or disables antithetic path pairing (defaults to disabled).
    ///
    /// When enabled, `n_paths` must be even: the second half of the path
    /// matrix reuses the first half's random draws negated.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required parameter is missing or any
    /// parameter is out of range.
    pub fn build(self) -> Result<LsmConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::MissingParameter {
            name: "n_paths",
        })?;
        let n_steps = self.n_steps.ok_or(ConfigError::MissingParameter {
            name: "n_steps",
        })?;

        let config = LsmConfig {
            n_paths,
            n_steps,
            n_batches: self.n_batches.unwrap_or(1),
            antithetic: self.antithetic,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
