//! Conditional coverage of a query track given a reference track
//!
//! For every position we tally whether the reference and the query cover it,
//! split by the dependent region. A dependent query shows
//! `p(query | ref) > p(query | !ref)` inside the region and equality (up to
//! sampling noise) outside.

use std::collections::HashMap;

use tracing::warn;

use crate::annotation::{AnnotationSet, Chromosome};
use crate::region::DependentRegion;
use crate::track::ChromosomeTrack;

/// Position counts split by reference coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionalCoverage {
    /// Positions covered by the reference.
    pub reference_covered: u64,
    /// Of those, positions also covered by the query.
    pub query_given_reference: u64,
    /// Positions not covered by the reference.
    pub reference_uncovered: u64,
    /// Of those, positions covered by the query.
    pub query_given_no_reference: u64,
}

impl ConditionalCoverage {
    fn record(&mut self, reference: bool, query: bool) {
        if reference {
            self.reference_covered += 1;
            self.query_given_reference += u64::from(query);
        } else {
            self.reference_uncovered += 1;
            self.query_given_no_reference += u64::from(query);
        }
    }

    /// Total positions tallied.
    pub fn positions(&self) -> u64 {
        self.reference_covered + self.reference_uncovered
    }

    /// `p(query | reference covered)`; 0 when the reference covers nothing.
    pub fn p_query_given_reference(&self) -> f64 {
        ratio(self.query_given_reference, self.reference_covered)
    }

    /// `p(query | reference not covered)`; 0 when the reference covers everything.
    pub fn p_query_given_no_reference(&self) -> f64 {
        ratio(self.query_given_no_reference, self.reference_uncovered)
    }

    /// Difference of the two conditional fractions.
    pub fn gap(&self) -> f64 {
        self.p_query_given_reference() - self.p_query_given_no_reference()
    }

    /// Ratio of the two conditional fractions, `None` when undefined.
    pub fn enrichment(&self) -> Option<f64> {
        let denominator = self.p_query_given_no_reference();
        (denominator > 0.0).then(|| self.p_query_given_reference() / denominator)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Conditional coverage inside and outside the dependent region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    /// Positions inside the dependent region.
    pub dependent: ConditionalCoverage,
    /// Positions outside the dependent region.
    pub independent: ConditionalCoverage,
}

impl CoverageSummary {
    /// Tally coverage from per-chromosome tracks in genome order.
    pub fn from_tracks<R: DependentRegion + ?Sized>(
        genome: &[Chromosome],
        reference: &[ChromosomeTrack],
        query: &[ChromosomeTrack],
        region: &R,
    ) -> Self {
        let mut summary = Self::default();
        for (id, ((chrom, reference), query)) in
            genome.iter().zip(reference).zip(query).enumerate()
        {
            let (reference_bits, query_bits) = (reference.bits(), query.bits());
            let span = reference_bits.len().min(query_bits.len());
            for pos in 0..span {
                let bucket = if region.is_dependent(id, pos as u64, chrom.size) {
                    &mut summary.dependent
                } else {
                    &mut summary.independent
                };
                bucket.record(reference_bits[pos], query_bits[pos]);
            }
        }
        summary
    }

    /// Tally coverage from two annotation sets over `genome`.
    pub fn from_annotations<R: DependentRegion + ?Sized>(
        genome: &[Chromosome],
        reference: &AnnotationSet,
        query: &AnnotationSet,
        region: &R,
    ) -> Self {
        let reference = tracks_from_annotations(genome, reference);
        let query = tracks_from_annotations(genome, query);
        Self::from_tracks(genome, &reference, &query, region)
    }

    /// Counts over the whole genome.
    pub fn total(&self) -> ConditionalCoverage {
        let (a, b) = (&self.dependent, &self.independent);
        ConditionalCoverage {
            reference_covered: a.reference_covered + b.reference_covered,
            query_given_reference: a.query_given_reference + b.query_given_reference,
            reference_uncovered: a.reference_uncovered + b.reference_uncovered,
            query_given_no_reference: a.query_given_no_reference + b.query_given_no_reference,
        }
    }
}

/// Build one coverage track per chromosome of `genome` from `annotations`.
///
/// Intervals on chromosomes missing from `genome` are skipped with a warning.
pub fn tracks_from_annotations(
    genome: &[Chromosome],
    annotations: &AnnotationSet,
) -> Vec<ChromosomeTrack> {
    let index: HashMap<&str, usize> = genome
        .iter()
        .enumerate()
        .map(|(id, chrom)| (&*chrom.name, id))
        .collect();
    let mut tracks: Vec<ChromosomeTrack> = genome
        .iter()
        .map(|chrom| ChromosomeTrack::new(chrom.size))
        .collect();

    let mut skipped = 0usize;
    for interval in annotations {
        match index.get(&*interval.chrom) {
            Some(&id) => tracks[id].cover(interval.begin..interval.end),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "intervals on chromosomes absent from the size table were ignored");
    }

    tracks
}
