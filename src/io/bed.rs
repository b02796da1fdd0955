use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::{ensure_dir, RunFile};
use crate::annotation::{AnnotationSet, Interval};
use crate::AnnotationError;

/// Write `chrom\tbegin\tend` lines in set order, no header.
pub fn write_bed<W: Write>(writer: &mut W, annotations: &AnnotationSet) -> std::io::Result<()> {
    for interval in annotations {
        writeln!(
            writer,
            "{}\t{}\t{}",
            interval.chrom, interval.begin, interval.end
        )?;
    }
    writer.flush()
}

/// Render annotations into a BED string (useful for tests and snapshots).
pub fn render_bed(annotations: &AnnotationSet) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_bed(&mut buffer, annotations);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write a run's annotation file into `output_dir`, returning its path.
pub fn save_annotation(
    output_dir: &Path,
    annotations: &AnnotationSet,
    file: &RunFile,
) -> Result<PathBuf, AnnotationError> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(file.file_name());
    let handle = File::create(&path).map_err(|source| AnnotationError::io(&path, source))?;
    let mut writer = BufWriter::new(handle);
    write_bed(&mut writer, annotations).map_err(|source| AnnotationError::io(&path, source))?;

    info!(
        path = %path.display(),
        intervals = annotations.len(),
        "{} annotation saved",
        file.role
    );
    Ok(path)
}

/// Parse 3-column BED records. Blank lines are skipped and columns past the
/// third are ignored. `origin` only labels errors.
pub fn parse_bed<R: BufRead>(reader: R, origin: &Path) -> Result<AnnotationSet, AnnotationError> {
    let mut intervals = Vec::new();
    let mut last_chrom: Option<Arc<str>> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| AnnotationError::io(origin, source))?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(chrom), Some(begin), Some(end)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(AnnotationError::parse(
                origin,
                line_no,
                "expected 3 tab-separated columns",
            ));
        };
        let begin: u64 = begin.trim().parse().map_err(|_| {
            AnnotationError::parse(origin, line_no, format!("invalid begin '{begin}'"))
        })?;
        let end: u64 = end
            .trim()
            .parse()
            .map_err(|_| AnnotationError::parse(origin, line_no, format!("invalid end '{end}'")))?;
        if end < begin {
            return Err(AnnotationError::parse(
                origin,
                line_no,
                format!("end {end} precedes begin {begin}"),
            ));
        }

        // Share one name allocation per run of same-chromosome records.
        let chrom: Arc<str> = match last_chrom.take() {
            Some(name) if &*name == chrom => name,
            _ => Arc::from(chrom),
        };
        last_chrom = Some(Arc::clone(&chrom));
        intervals.push(Interval { chrom, begin, end });
    }

    Ok(AnnotationSet::from_intervals(intervals))
}

/// Read a BED file written by [`save_annotation`].
pub fn read_bed(path: &Path) -> Result<AnnotationSet, AnnotationError> {
    let file = File::open(path).map_err(|source| AnnotationError::io(path, source))?;
    parse_bed(BufReader::new(file), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_tab_delimited_without_header() {
        let set = AnnotationSet::from_intervals(vec![
            Interval::new("chr1", 0, 100),
            Interval::new("chr2", 250, 350),
        ]);
        assert_eq!(render_bed(&set), "chr1\t0\t100\nchr2\t250\t350\n");
    }

    #[test]
    fn parse_reports_line_numbers() {
        let input = "chr1\t0\t100\n\nchr1\tx\t200\n";
        let err = parse_bed(input.as_bytes(), Path::new("in.bed")).unwrap_err();
        match err {
            AnnotationError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_short_and_inverted_records() {
        assert!(parse_bed("chr1\t5\n".as_bytes(), Path::new("a")).is_err());
        assert!(parse_bed("chr1\t50\t10\n".as_bytes(), Path::new("a")).is_err());
    }

    #[test]
    fn parse_ignores_extra_columns() {
        let set = parse_bed("chr1\t5\t10\tname\t0\n".as_bytes(), Path::new("a")).unwrap();
        assert_eq!(set.intervals(), &[Interval::new("chr1", 5, 10)]);
    }
}
