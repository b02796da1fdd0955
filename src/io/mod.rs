//! Annotation output and input
//!
//! Tab-delimited 3-column BED records, the chromosome-size sidecar, run file
//! naming and the experiments manifest consumed by batch tooling.

mod bed;
mod chrom_sizes;
mod manifest;
mod naming;

pub use bed::{parse_bed, read_bed, render_bed, save_annotation, write_bed};
pub use chrom_sizes::{
    parse_chrom_sizes, read_chrom_sizes, render_chrom_sizes, save_chrom_sizes, write_chrom_sizes,
    CHROM_SIZES_FILE,
};
pub use manifest::{
    merge_manifest_row, parse_manifest, read_manifest, record_run, render_manifest, save_manifest,
    ExperimentRow, MANIFEST_FILE,
};
pub use naming::{format_factor, RunFile, TrackRole};

use std::fs;
use std::path::Path;

use crate::AnnotationError;

/// Create `dir` and its parents if missing.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), AnnotationError> {
    fs::create_dir_all(dir).map_err(|source| AnnotationError::io(dir, source))
}
