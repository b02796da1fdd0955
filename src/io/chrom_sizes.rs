use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::ensure_dir;
use crate::annotation::Chromosome;
use crate::AnnotationError;

/// Name of the chromosome-size sidecar inside an output directory.
pub const CHROM_SIZES_FILE: &str = "chr_sizes.txt";

/// Write `name\tsize` per chromosome.
pub fn write_chrom_sizes<W: Write>(writer: &mut W, genome: &[Chromosome]) -> std::io::Result<()> {
    for chrom in genome {
        writeln!(writer, "{}\t{}", chrom.name, chrom.size)?;
    }
    writer.flush()
}

/// Render the sidecar into a string.
pub fn render_chrom_sizes(genome: &[Chromosome]) -> String {
    genome
        .iter()
        .map(|chrom| format!("{}\t{}\n", chrom.name, chrom.size))
        .collect()
}

/// Write [`CHROM_SIZES_FILE`] into `output_dir`, returning its path.
pub fn save_chrom_sizes(output_dir: &Path, genome: &[Chromosome]) -> Result<PathBuf, AnnotationError> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(CHROM_SIZES_FILE);
    let handle = File::create(&path).map_err(|source| AnnotationError::io(&path, source))?;
    write_chrom_sizes(&mut BufWriter::new(handle), genome)
        .map_err(|source| AnnotationError::io(&path, source))?;

    info!(path = %path.display(), chromosomes = genome.len(), "chromosome sizes saved");
    Ok(path)
}

/// Parse `name\tsize` lines.
pub fn parse_chrom_sizes<R: BufRead>(
    reader: R,
    origin: &Path,
) -> Result<Vec<Chromosome>, AnnotationError> {
    let mut genome = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AnnotationError::io(origin, source))?;
        if line.trim().is_empty() {
            continue;
        }
        let (name, size) = line
            .split_once('\t')
            .ok_or_else(|| AnnotationError::parse(origin, idx + 1, "expected name<TAB>size"))?;
        let size: u64 = size.trim().parse().map_err(|_| {
            AnnotationError::parse(origin, idx + 1, format!("invalid chromosome size '{size}'"))
        })?;
        genome.push(Chromosome::new(name, size));
    }
    Ok(genome)
}

/// Read a chromosome-size sidecar.
pub fn read_chrom_sizes(path: &Path) -> Result<Vec<Chromosome>, AnnotationError> {
    let file = File::open(path).map_err(|source| AnnotationError::io(path, source))?;
    parse_chrom_sizes(BufReader::new(file), path)
}
