use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use annosim::config::{factor_range, validate_dependency_factor, SweepConfig};
use annosim::generator::seeded_rng;
use annosim::io::{read_bed, read_chrom_sizes, record_run, save_chrom_sizes};
use annosim::sweep::{run_sweep, write_run};
use annosim::{
    ConditionalCoverage, CoverageSummary, DependencyRegion, GeneratorConfig, IntervalTrackGenerator,
};

#[derive(Parser, Debug)]
#[command(
    name = "annosim",
    about = "Generate reference/query annotations with a tunable dependency"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a single reference/query pair.
    Generate {
        /// Destination directory.
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Density skew applied to the query where the reference is present.
        #[arg(long)]
        dependency_factor: f64,
        /// Replicate id used in file names.
        #[arg(long, default_value_t = 1)]
        run: u32,
        /// Random seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[command(flatten)]
        genome: GenomeArgs,
    },
    /// Sweep dependency factors × replicates and write an experiments list.
    Sweep {
        /// Destination directory.
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Explicit factors (overrides the range flags).
        #[arg(long, value_delimiter = ',')]
        factors: Vec<f64>,
        /// Smallest factor of the range.
        #[arg(long, default_value_t = 1.0)]
        min_factor: f64,
        /// Largest factor of the range.
        #[arg(long, default_value_t = 2.0)]
        max_factor: f64,
        /// Step between factors.
        #[arg(long, default_value_t = 0.1)]
        step: f64,
        /// Replicates per factor.
        #[arg(long, default_value_t = 10)]
        replicates: u32,
        /// Base random seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Worker threads (defaults to all cores).
        #[arg(long)]
        threads: Option<usize>,
        #[command(flatten)]
        genome: GenomeArgs,
    },
    /// Report query coverage conditioned on reference coverage.
    Check {
        /// Reference BED file.
        #[arg(long)]
        reference: PathBuf,
        /// Query BED file.
        #[arg(long)]
        query: PathBuf,
        /// Chromosome sizes (`name<TAB>size`).
        #[arg(long)]
        chrom_sizes: PathBuf,
        #[command(flatten)]
        region: RegionArgs,
    },
}

#[derive(Args, Debug)]
struct GenomeArgs {
    /// Length of each simulated chromosome.
    #[arg(long, default_value_t = annosim::config::DEFAULT_CHROMOSOME_SIZE)]
    chromosome_size: u64,
    /// Number of chromosomes.
    #[arg(long, default_value_t = annosim::config::DEFAULT_CHROMOSOME_COUNT)]
    chromosome_count: usize,
    /// Target covered fraction.
    #[arg(long, default_value_t = annosim::config::DEFAULT_COVERAGE_TARGET)]
    coverage: f64,
    /// Fixed interval length.
    #[arg(long, default_value_t = annosim::config::DEFAULT_INTERVAL_LENGTH)]
    interval_length: u64,
    #[command(flatten)]
    region: RegionArgs,
}

#[derive(Args, Debug)]
struct RegionArgs {
    /// Dependent chromosome (0-based).
    #[arg(long, default_value_t = 0)]
    dependent_chrom: usize,
    /// Restrict dependence to a window starting at this fraction of the chromosome.
    #[arg(long, requires = "window_end")]
    window_start: Option<f64>,
    /// End fraction of the dependent window (exclusive).
    #[arg(long, requires = "window_start")]
    window_end: Option<f64>,
}

impl RegionArgs {
    fn region(&self) -> DependencyRegion {
        match (self.window_start, self.window_end) {
            (Some(start_fraction), Some(end_fraction)) => DependencyRegion::Window {
                chromosome: self.dependent_chrom,
                start_fraction,
                end_fraction,
            },
            _ => DependencyRegion::WholeChromosome(self.dependent_chrom),
        }
    }
}

impl GenomeArgs {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_chromosome_size(self.chromosome_size)
            .with_chromosome_count(self.chromosome_count)
            .with_coverage_target(self.coverage)
            .with_interval_length(self.interval_length)
            .with_region(self.region.region())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output_dir,
            dependency_factor,
            run,
            seed,
            genome,
        } => run_generate(&output_dir, genome.config(), dependency_factor, run, seed)?,
        Commands::Sweep {
            output_dir,
            factors,
            min_factor,
            max_factor,
            step,
            replicates,
            seed,
            threads,
            genome,
        } => {
            let factors = if factors.is_empty() {
                factor_range(min_factor, max_factor, step)?
            } else {
                factors
            };
            if let Some(threads) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("failed to configure worker threads")?;
            }
            let config = SweepConfig {
                generator: genome.config(),
                factors,
                replicates,
                seed,
                output_dir,
            };
            let outcome = run_sweep(&config).context("sweep failed")?;
            info!(
                runs = outcome.runs.len(),
                manifest = %outcome.manifest.display(),
                "sweep finished"
            );
        }
        Commands::Check {
            reference,
            query,
            chrom_sizes,
            region,
        } => run_check(&reference, &query, &chrom_sizes, region.region())?,
    }

    Ok(())
}

fn run_generate(
    output_dir: &Path,
    config: GeneratorConfig,
    dependency_factor: f64,
    run: u32,
    seed: u64,
) -> Result<()> {
    validate_dependency_factor(dependency_factor)?;
    let generator = IntervalTrackGenerator::new(config).context("invalid generator configuration")?;
    let chrom_sizes = save_chrom_sizes(output_dir, generator.genome())?;
    let mut rng = seeded_rng(seed);
    let row = write_run(
        &generator,
        output_dir,
        &chrom_sizes,
        dependency_factor,
        run,
        &mut rng,
    )
    .with_context(|| format!("failed to generate run {} (factor {})", run, dependency_factor))?;
    record_run(output_dir, row)?;
    Ok(())
}

fn run_check(
    reference_path: &Path,
    query_path: &Path,
    chrom_sizes_path: &Path,
    region: DependencyRegion,
) -> Result<()> {
    let genome = read_chrom_sizes(chrom_sizes_path)?;
    region
        .validate(genome.len())
        .context("dependent region does not match the chromosome sizes")?;
    let reference = read_bed(reference_path)?;
    let query = read_bed(query_path)?;

    let summary = CoverageSummary::from_annotations(&genome, &reference, &query, &region);
    print_coverage("dependent", &summary.dependent);
    print_coverage("independent", &summary.independent);
    print_coverage("total", &summary.total());
    Ok(())
}

fn print_coverage(label: &str, coverage: &ConditionalCoverage) {
    let enrichment = coverage
        .enrichment()
        .map(|value| format!("{:.4}", value))
        .unwrap_or_else(|| "NA".to_string());
    println!(
        "{}\tpositions={}\tp(query|ref)={:.6}\tp(query|!ref)={:.6}\tenrichment={}",
        label,
        coverage.positions(),
        coverage.p_query_given_reference(),
        coverage.p_query_given_no_reference(),
        enrichment
    );
}
