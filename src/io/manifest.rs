use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::ensure_dir;
use crate::AnnotationError;

/// Name of the experiments manifest inside an output directory.
pub const MANIFEST_FILE: &str = "experiments_list.tsv";

const HEADER: &str = "label\treference\tquery\tchr_sizes";

/// One reference/query pair listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentRow {
    /// Run label, e.g. `depfac1.5_3`.
    pub label: String,
    /// Reference annotation path.
    pub reference: PathBuf,
    /// Query annotation path.
    pub query: PathBuf,
    /// Chromosome-size sidecar path.
    pub chr_sizes: PathBuf,
}

/// Render the manifest with its header line.
pub fn render_manifest(rows: &[ExperimentRow]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            row.label,
            row.reference.display(),
            row.query.display(),
            row.chr_sizes.display()
        ));
    }
    out
}

/// Write [`MANIFEST_FILE`] into `output_dir`, returning its path.
pub fn save_manifest(output_dir: &Path, rows: &[ExperimentRow]) -> Result<PathBuf, AnnotationError> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(MANIFEST_FILE);
    let handle = File::create(&path).map_err(|source| AnnotationError::io(&path, source))?;
    let mut writer = BufWriter::new(handle);
    writer
        .write_all(render_manifest(rows).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|source| AnnotationError::io(&path, source))?;

    info!(path = %path.display(), experiments = rows.len(), "experiments list saved");
    Ok(path)
}

/// Parse a manifest; the header line is required.
pub fn parse_manifest<R: BufRead>(
    reader: R,
    origin: &Path,
) -> Result<Vec<ExperimentRow>, AnnotationError> {
    let mut rows = Vec::new();
    let mut header_seen = false;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AnnotationError::io(origin, source))?;
        if line.trim().is_empty() {
            continue;
        }
        if !header_seen {
            if line.trim_end() != HEADER {
                return Err(AnnotationError::parse(origin, idx + 1, "missing manifest header"));
            }
            header_seen = true;
            continue;
        }
        let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
        let [label, reference, query, chr_sizes] = fields[..] else {
            return Err(AnnotationError::parse(
                origin,
                idx + 1,
                format!("expected 4 columns, found {}", fields.len()),
            ));
        };
        rows.push(ExperimentRow {
            label: label.to_string(),
            reference: reference.into(),
            query: query.into(),
            chr_sizes: chr_sizes.into(),
        });
    }
    Ok(rows)
}

/// Read a manifest file.
pub fn read_manifest(path: &Path) -> Result<Vec<ExperimentRow>, AnnotationError> {
    let file = File::open(path).map_err(|source| AnnotationError::io(path, source))?;
    parse_manifest(BufReader::new(file), path)
}

/// Replace the row sharing `row.label`, or append it.
pub fn merge_manifest_row(rows: &mut Vec<ExperimentRow>, row: ExperimentRow) {
    match rows.iter_mut().find(|existing| existing.label == row.label) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

/// Add one run to the manifest in `output_dir`, keeping rows written by
/// earlier invocations.
pub fn record_run(output_dir: &Path, row: ExperimentRow) -> Result<PathBuf, AnnotationError> {
    let path = output_dir.join(MANIFEST_FILE);
    let mut rows = match File::open(&path) {
        Ok(file) => parse_manifest(BufReader::new(file), &path)?,
        Err(source) if source.kind() == ErrorKind::NotFound => Vec::new(),
        Err(source) => return Err(AnnotationError::io(&path, source)),
    };
    merge_manifest_row(&mut rows, row);
    save_manifest(output_dir, &rows)
}
