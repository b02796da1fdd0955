//! # Synthetic annotations with tunable dependency
//!
//! Generates pairs of genomic interval tracks for benchmarking overlap
//! significance tests. The *reference* track places fixed-length,
//! non-overlapping intervals independently along each chromosome. The
//! *query* track is drawn the same way, except that inside a dependent
//! region its placement density is multiplied by a dependency factor where
//! the reference is present and divided by it where it is absent.
//!
//! A factor of `1.0` yields independent tracks (a true negative for a
//! significance test). Larger factors yield increasingly detectable
//! positive association inside the dependent region.
//!
//! ## Usage Example
//!
//! ```no_run
//! use annosim::{GeneratorConfig, IntervalTrackGenerator};
//! use annosim::generator::seeded_rng;
//!
//! let generator = IntervalTrackGenerator::new(GeneratorConfig::default())?;
//! let pair = generator.generate_pair(1.5, &mut seeded_rng(42))?;
//! assert!(pair.query.is_sorted_disjoint());
//! # Ok::<(), annosim::AnnotationError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod annotation; // Interval and annotation-set model
pub mod config;     // Generator and sweep parameters
pub mod coverage;   // Conditional coverage summaries
pub mod generator;  // Reference and dependent track generation
pub mod io;         // BED, chromosome sizes, manifest
pub mod region;     // Dependent-region policies
pub mod sweep;      // Factor × replicate batch driver
pub mod track;      // Dense coverage bitmaps

// Re-exports for convenience
pub use annotation::{AnnotationSet, Chromosome, Interval};
pub use config::{ConfigError, GeneratorConfig, SweepConfig};
pub use coverage::{ConditionalCoverage, CoverageSummary};
pub use generator::{GeneratedPair, IntervalTrackGenerator, ReferenceTrack};
pub use region::{DependencyRegion, DependentRegion};
pub use track::ChromosomeTrack;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while generating, writing or reading annotations.
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// Invalid configuration, detected before any work starts.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A record could not be parsed.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}

impl AnnotationError {
    /// Helper for constructing I/O errors tied to a path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        AnnotationError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Helper for constructing parse errors.
    pub fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        AnnotationError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: AnnotationError = ConfigError::ZeroIntervalLength.into();
        assert_eq!(err.to_string(), "interval length must be positive");
    }

    #[test]
    fn parse_error_names_file_and_line() {
        let err = AnnotationError::parse(Path::new("a.bed"), 4, "bad record");
        assert_eq!(err.to_string(), "a.bed:4: bad record");
    }
}
