//! Generator and sweep configuration
//!
//! All parameters live in explicit values passed to the generator at call
//! time. A configuration must pass [`GeneratorConfig::validate`] before any
//! generation work starts.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::io::format_factor;
use crate::region::DependencyRegion;

/// Default length of every simulated chromosome.
pub const DEFAULT_CHROMOSOME_SIZE: u64 = 1_000_000;
/// Default target fraction of the genome covered by intervals.
pub const DEFAULT_COVERAGE_TARGET: f64 = 0.1;
/// Default number of simulated chromosomes.
pub const DEFAULT_CHROMOSOME_COUNT: usize = 2;
/// Default fixed interval length.
pub const DEFAULT_INTERVAL_LENGTH: u64 = 100;
/// Largest accepted chromosome size; its coverage bitmap takes 2 GiB.
pub const MAX_CHROMOSOME_SIZE: u64 = 1 << 34;
/// Largest number of factors a range may expand to.
pub const MAX_SWEEP_FACTORS: u64 = 10_000;
/// Factors are rounded to this resolution before they are named.
pub const FACTOR_RESOLUTION: f64 = 1e-9;

/// Invalid numeric parameters, rejected before generation begins.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Chromosome size must be positive.
    #[error("chromosome size must be positive")]
    ZeroChromosomeSize,

    /// At least one chromosome is required.
    #[error("chromosome count must be positive")]
    ZeroChromosomeCount,

    /// Chromosome too large for its coverage bitmap.
    #[error("chromosome size {size} exceeds the maximum of {max}")]
    ChromosomeTooLarge {
        /// Configured chromosome size.
        size: u64,
        /// Largest accepted size.
        max: u64,
    },

    /// Interval length must be positive.
    #[error("interval length must be positive")]
    ZeroIntervalLength,

    /// Interval must fit strictly inside a chromosome.
    #[error("interval length {interval_length} must be smaller than chromosome size {chromosome_size}")]
    IntervalTooLong {
        /// Configured interval length.
        interval_length: u64,
        /// Configured chromosome size.
        chromosome_size: u64,
    },

    /// Coverage target must be a finite, non-negative number.
    #[error("coverage target must be finite and non-negative, got {0}")]
    InvalidCoverage(f64),

    /// Dependency factor must be a finite, positive number.
    #[error("dependency factor must be finite and positive, got {0}")]
    InvalidDependencyFactor(f64),

    /// Dependent region refers to a chromosome outside the genome.
    #[error("dependent region chromosome {chromosome} out of range (genome has {count})")]
    RegionOutOfRange {
        /// Requested 0-based chromosome index.
        chromosome: usize,
        /// Number of configured chromosomes.
        count: usize,
    },

    /// Window fractions must satisfy `0 <= start < end <= 1`.
    #[error("invalid window fractions [{start}, {end})")]
    InvalidWindow {
        /// Start fraction.
        start: f64,
        /// End fraction.
        end: f64,
    },

    /// Sweep needs at least one dependency factor.
    #[error("sweep has no dependency factors")]
    EmptySweep,

    /// Factor range step must be positive and the range ordered.
    #[error("invalid factor range {min}..={max} step {step}")]
    InvalidFactorRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Step between factors.
        step: f64,
    },

    /// Two factors would write to the same files.
    #[error("dependency factor {0} appears more than once in the sweep")]
    DuplicateFactor(f64),

    /// Factor range expands to more factors than a sweep accepts.
    #[error("factor range expands to {count} factors (max {max})")]
    TooManyFactors {
        /// Number of factors the range would produce.
        count: u64,
        /// Largest accepted count.
        max: u64,
    },

    /// Sweep needs at least one replicate.
    #[error("replicate count must be positive")]
    ZeroReplicates,
}

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Length of each simulated chromosome.
    pub chromosome_size: u64,
    /// Approximate genome-wide covered fraction.
    pub coverage_target: f64,
    /// Number of chromosomes, named `chr1..=chrN`.
    pub chromosome_count: usize,
    /// Fixed length of every interval.
    pub interval_length: u64,
    /// Where the query track depends on the reference track.
    pub region: DependencyRegion,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chromosome_size: DEFAULT_CHROMOSOME_SIZE,
            coverage_target: DEFAULT_COVERAGE_TARGET,
            chromosome_count: DEFAULT_CHROMOSOME_COUNT,
            interval_length: DEFAULT_INTERVAL_LENGTH,
            region: DependencyRegion::WholeChromosome(0),
        }
    }
}

impl GeneratorConfig {
    /// Single-chromosome layout with a dependent window over the middle
    /// tenth of the chromosome.
    pub fn windowed() -> Self {
        Self {
            chromosome_count: 1,
            region: DependencyRegion::Window {
                chromosome: 0,
                start_fraction: 0.45,
                end_fraction: 0.55,
            },
            ..Self::default()
        }
    }

    /// Set chromosome size.
    pub fn with_chromosome_size(mut self, size: u64) -> Self {
        self.chromosome_size = size;
        self
    }

    /// Set coverage target.
    pub fn with_coverage_target(mut self, coverage: f64) -> Self {
        self.coverage_target = coverage;
        self
    }

    /// Set chromosome count.
    pub fn with_chromosome_count(mut self, count: usize) -> Self {
        self.chromosome_count = count;
        self
    }

    /// Set interval length.
    pub fn with_interval_length(mut self, length: u64) -> Self {
        self.interval_length = length;
        self
    }

    /// Set dependent region policy.
    pub fn with_region(mut self, region: DependencyRegion) -> Self {
        self.region = region;
        self
    }

    /// Check every numeric parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chromosome_size == 0 {
            return Err(ConfigError::ZeroChromosomeSize);
        }
        if self.chromosome_size > MAX_CHROMOSOME_SIZE
            || usize::try_from(self.chromosome_size).is_err()
        {
            return Err(ConfigError::ChromosomeTooLarge {
                size: self.chromosome_size,
                max: MAX_CHROMOSOME_SIZE,
            });
        }
        if self.chromosome_count == 0 {
            return Err(ConfigError::ZeroChromosomeCount);
        }
        if self.interval_length == 0 {
            return Err(ConfigError::ZeroIntervalLength);
        }
        if self.interval_length >= self.chromosome_size {
            return Err(ConfigError::IntervalTooLong {
                interval_length: self.interval_length,
                chromosome_size: self.chromosome_size,
            });
        }
        if !self.coverage_target.is_finite() || self.coverage_target < 0.0 {
            return Err(ConfigError::InvalidCoverage(self.coverage_target));
        }
        self.region.validate(self.chromosome_count)
    }
}

/// Check a dependency factor.
pub fn validate_dependency_factor(factor: f64) -> Result<(), ConfigError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDependencyFactor(factor))
    }
}

/// Parameters of a dependency-factor × replicate sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Per-run generator parameters.
    pub generator: GeneratorConfig,
    /// Dependency factors to sweep, in output order.
    pub factors: Vec<f64>,
    /// Replicates per factor, numbered `1..=replicates`.
    pub replicates: u32,
    /// Base seed; each run derives its own stream from it.
    pub seed: u64,
    /// Destination directory.
    pub output_dir: PathBuf,
}

impl SweepConfig {
    /// Sweep with default factors `1.0, 1.1, ..., 2.0` and 10 replicates.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator: GeneratorConfig::default(),
            factors: factor_range(1.0, 2.0, 0.1).unwrap_or_default(),
            replicates: 10,
            seed: 0,
            output_dir: output_dir.into(),
        }
    }

    /// Check generator parameters, every factor and the replicate count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        if self.factors.is_empty() {
            return Err(ConfigError::EmptySweep);
        }
        let mut names = HashSet::with_capacity(self.factors.len());
        for &factor in &self.factors {
            validate_dependency_factor(factor)?;
            if !names.insert(format_factor(factor)) {
                return Err(ConfigError::DuplicateFactor(factor));
            }
        }
        if self.replicates == 0 {
            return Err(ConfigError::ZeroReplicates);
        }
        Ok(())
    }
}

/// Inclusive factor range built from integer steps, so `1.0..=2.0` by `0.1`
/// yields exactly eleven factors without accumulated rounding.
///
/// The step must be at least [`FACTOR_RESOLUTION`], and the range may hold at
/// most [`MAX_SWEEP_FACTORS`] factors.
pub fn factor_range(min: f64, max: f64, step: f64) -> Result<Vec<f64>, ConfigError> {
    let bad = || ConfigError::InvalidFactorRange { min, max, step };
    if !(min.is_finite() && max.is_finite() && step.is_finite())
        || step < FACTOR_RESOLUTION
        || max < min
    {
        return Err(bad());
    }
    let span = ((max - min) / step + 1e-9).floor();
    if span >= MAX_SWEEP_FACTORS as f64 {
        return Err(ConfigError::TooManyFactors {
            count: span as u64 + 1,
            max: MAX_SWEEP_FACTORS,
        });
    }
    let steps = span as u64;
    Ok((0..=steps)
        .map(|i| round_factor(min + i as f64 * step))
        .collect())
}

// Trim float noise such as 1.2000000000000002 so file names stay stable.
fn round_factor(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
        assert!(GeneratorConfig::windowed().validate().is_ok());
    }

    #[test]
    fn factor_range_matches_sweep_defaults() {
        let factors = factor_range(1.0, 2.0, 0.1).unwrap();
        assert_eq!(factors.len(), 11);
        assert_eq!(factors[0], 1.0);
        assert_eq!(factors[2], 1.2);
        assert_eq!(factors[10], 2.0);
    }

    #[test]
    fn factor_range_rejects_bad_step() {
        assert!(factor_range(1.0, 2.0, 0.0).is_err());
        assert!(factor_range(2.0, 1.0, 0.1).is_err());
        // below the naming resolution neighbouring factors would share a file
        assert!(matches!(
            factor_range(1.0, 1.0 + 1e-9, 1e-10),
            Err(ConfigError::InvalidFactorRange { .. })
        ));
    }

    #[test]
    fn factor_range_is_capped() {
        assert_eq!(
            factor_range(1.0, 1e6, 1.0),
            Err(ConfigError::TooManyFactors {
                count: 1_000_000,
                max: MAX_SWEEP_FACTORS,
            })
        );
        assert_eq!(factor_range(1.0, 10_000.0, 1.0).unwrap().len(), 10_000);
    }

    #[test]
    fn sweep_rejects_factors_sharing_a_file_name() {
        let mut sweep = SweepConfig::new("out");
        sweep.factors = vec![1.0, 1.5, 1.5];
        assert_eq!(sweep.validate(), Err(ConfigError::DuplicateFactor(1.5)));

        sweep.factors = vec![2.0, 2.0000000000000004];
        assert!(sweep.validate().is_ok());
    }

    #[test]
    fn sweep_defaults() {
        let sweep = SweepConfig::new("out");
        assert_eq!(sweep.replicates, 10);
        assert_eq!(sweep.factors.len(), 11);
        assert!(sweep.validate().is_ok());
    }
}
