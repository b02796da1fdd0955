use std::fs;

use annosim::io::{read_bed, read_chrom_sizes, RunFile, TrackRole, CHROM_SIZES_FILE, MANIFEST_FILE};
use annosim::sweep::run_sweep;
use annosim::{AnnotationError, ConfigError, GeneratorConfig, SweepConfig};

fn sweep_in(dir: &std::path::Path) -> SweepConfig {
    SweepConfig {
        generator: GeneratorConfig::windowed().with_chromosome_size(50_000),
        factors: vec![1.0, 1.5],
        replicates: 2,
        seed: 3,
        output_dir: dir.join("nested").join("out"),
    }
}

#[test]
fn sweep_writes_pairs_sizes_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let config = sweep_in(dir.path());
    let outcome = run_sweep(&config).expect("sweep succeeds");

    assert_eq!(outcome.chrom_sizes, config.output_dir.join(CHROM_SIZES_FILE));
    assert_eq!(outcome.manifest, config.output_dir.join(MANIFEST_FILE));
    let genome = read_chrom_sizes(&outcome.chrom_sizes).unwrap();
    assert_eq!(genome.len(), 1);
    assert_eq!(genome[0].size, 50_000);

    let labels: Vec<&str> = outcome.runs.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, ["depfac1.0_1", "depfac1.0_2", "depfac1.5_1", "depfac1.5_2"]);

    for row in &outcome.runs {
        let reference_name = row.reference.file_name().unwrap().to_str().unwrap();
        let query_name = row.query.file_name().unwrap().to_str().unwrap();
        let reference_id = RunFile::parse(reference_name).expect("reference name parses");
        let query_id = RunFile::parse(query_name).expect("query name parses");
        assert_eq!(reference_id.role, TrackRole::Reference);
        assert_eq!(query_id, reference_id.partner());
        assert_eq!(reference_id.label(), row.label);

        let reference = read_bed(&row.reference).unwrap();
        let query = read_bed(&row.query).unwrap();
        assert!(reference.is_sorted_disjoint());
        assert!(query.is_sorted_disjoint());
        assert!(reference.iter().all(|i| i.end < 50_000));
    }

    let manifest = fs::read_to_string(&outcome.manifest).unwrap();
    let mut lines = manifest.lines();
    assert_eq!(lines.next(), Some("label\treference\tquery\tchr_sizes"));
    assert_eq!(lines.count(), 4);
}

#[test]
fn invalid_sweep_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = sweep_in(dir.path());
    config.factors.push(-1.0);

    let err = run_sweep(&config).unwrap_err();
    assert!(matches!(
        err,
        AnnotationError::Config(ConfigError::InvalidDependencyFactor(f)) if f == -1.0
    ));
    assert!(!config.output_dir.exists());
}

#[test]
fn unwritable_output_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();

    let mut config = sweep_in(dir.path());
    config.output_dir = blocker.join("out");
    let err = run_sweep(&config).unwrap_err();
    assert!(matches!(err, AnnotationError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn repeated_factor_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = sweep_in(dir.path());
    config.factors = vec![1.5, 1.5];
    config.replicates = 1;

    let err = run_sweep(&config).unwrap_err();
    assert!(matches!(
        err,
        AnnotationError::Config(ConfigError::DuplicateFactor(f)) if f == 1.5
    ));
    assert!(!config.output_dir.exists());
}
