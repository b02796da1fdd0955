//! Reference and dependent interval-track generation
//!
//! Both passes scan every chromosome with a cursor. At each eligible start
//! position one uniform draw `u` decides placement: an interval is placed iff
//! `u * interval_length < density`. After a placement the cursor jumps to the
//! interval's end, so draws happen only at positions where an interval may
//! start. The last `interval_length` positions of a chromosome are never
//! starts (`pos + interval_length < chromosome_size`).
//!
//! The reference pass uses `density = coverage_target` everywhere and records
//! coverage in a [`ChromosomeTrack`]. The dependent pass multiplies the
//! density by the dependency factor where the reference covers `pos`, and
//! divides by it where it does not, but only inside the dependent region.

use std::ops::Range;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::annotation::{simulated_genome, AnnotationSet, Chromosome, Interval};
use crate::config::{validate_dependency_factor, ConfigError, GeneratorConfig};
use crate::region::{DependencyRegion, DependentRegion};
use crate::track::ChromosomeTrack;

/// Random stream used by the generator and the sweep driver.
pub type SimRng = Xoshiro256PlusPlus;

/// Seeded random stream.
pub fn seeded_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Reference annotations together with the coverage they induce.
#[derive(Debug, Clone)]
pub struct ReferenceTrack {
    /// Placed reference intervals.
    pub annotations: AnnotationSet,
    /// One coverage track per chromosome, in genome order.
    pub tracks: Vec<ChromosomeTrack>,
}

/// Reference/query pair from one run.
#[derive(Debug, Clone)]
pub struct GeneratedPair {
    /// Reference pass output.
    pub reference: ReferenceTrack,
    /// Dependent (query) intervals.
    pub query: AnnotationSet,
    /// Dependency factor used for the query pass.
    pub dependency_factor: f64,
}

/// Generator of fixed-length, non-overlapping interval tracks.
#[derive(Debug, Clone)]
pub struct IntervalTrackGenerator<R: DependentRegion = DependencyRegion> {
    config: GeneratorConfig,
    genome: Vec<Chromosome>,
    region: R,
}

impl IntervalTrackGenerator<DependencyRegion> {
    /// Generator using the configured dependent-region policy.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let region = config.region;
        Self::with_region(config, region)
    }
}

impl<R: DependentRegion> IntervalTrackGenerator<R> {
    /// Generator using a caller-supplied dependent-region predicate.
    ///
    /// The predicate replaces `config.region`.
    pub fn with_region(config: GeneratorConfig, region: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let genome = simulated_genome(config.chromosome_count, config.chromosome_size);
        Ok(Self {
            config,
            genome,
            region,
        })
    }

    /// Validated configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Simulated chromosomes, in output order.
    pub fn genome(&self) -> &[Chromosome] {
        &self.genome
    }

    /// Reference pass: placement independent across positions.
    pub fn generate_reference<G: Rng + ?Sized>(&self, rng: &mut G) -> ReferenceTrack {
        let coverage = self.config.coverage_target;
        let mut annotations = AnnotationSet::new();
        let mut tracks = Vec::with_capacity(self.genome.len());

        for chrom in &self.genome {
            let mut track = ChromosomeTrack::new(chrom.size);
            let placed = scan_chromosome(
                chrom,
                self.config.interval_length,
                rng,
                |_| coverage,
                |span| track.cover(span),
            );
            debug!(chrom = %chrom.name, intervals = placed.len(), "reference chromosome generated");
            annotations.extend(placed);
            tracks.push(track);
        }

        ReferenceTrack {
            annotations,
            tracks,
        }
    }

    /// Dependent pass conditioned on `reference` coverage tracks.
    ///
    /// A chromosome without a matching track is treated as uncovered.
    pub fn generate_dependent<G: Rng + ?Sized>(
        &self,
        reference: &[ChromosomeTrack],
        dependency_factor: f64,
        rng: &mut G,
    ) -> Result<AnnotationSet, ConfigError> {
        validate_dependency_factor(dependency_factor)?;
        let coverage = self.config.coverage_target;
        let enriched = coverage * dependency_factor;
        let depleted = coverage / dependency_factor;
        let mut annotations = AnnotationSet::new();

        for (id, chrom) in self.genome.iter().enumerate() {
            let track = reference.get(id);
            let density = |pos: u64| {
                if !self.region.is_dependent(id, pos, chrom.size) {
                    coverage
                } else if track.is_some_and(|t| t.is_covered(pos)) {
                    enriched
                } else {
                    depleted
                }
            };
            let placed = scan_chromosome(chrom, self.config.interval_length, rng, density, |_| {});
            debug!(chrom = %chrom.name, intervals = placed.len(), dependency_factor, "query chromosome generated");
            annotations.extend(placed);
        }

        Ok(annotations)
    }

    /// Reference pass followed by the dependent pass on the same stream.
    pub fn generate_pair<G: Rng + ?Sized>(
        &self,
        dependency_factor: f64,
        rng: &mut G,
    ) -> Result<GeneratedPair, ConfigError> {
        validate_dependency_factor(dependency_factor)?;
        let reference = self.generate_reference(rng);
        let query = self.generate_dependent(&reference.tracks, dependency_factor, rng)?;
        Ok(GeneratedPair {
            reference,
            query,
            dependency_factor,
        })
    }
}

fn scan_chromosome<G, D, P>(
    chrom: &Chromosome,
    interval_length: u64,
    rng: &mut G,
    mut density: D,
    mut on_place: P,
) -> Vec<Interval>
where
    G: Rng + ?Sized,
    D: FnMut(u64) -> f64,
    P: FnMut(Range<u64>),
{
    let scale = interval_length as f64;
    let mut intervals = Vec::new();
    let mut pos = 0u64;

    while pos + interval_length < chrom.size {
        let draw: f64 = rng.gen();
        if draw * scale < density(pos) {
            let end = pos + interval_length;
            on_place(pos..end);
            intervals.push(Interval::new(Arc::clone(&chrom.name), pos, end));
            pos = end;
        } else {
            pos += 1;
        }
    }

    intervals
}
