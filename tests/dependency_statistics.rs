//! Statistical behaviour of the dependent track
//!
//! Counts are pooled over several seeds so the conditional fractions are
//! stable; tolerances are loose relative to the effects being checked.

use annosim::generator::seeded_rng;
use annosim::{
    ConditionalCoverage, CoverageSummary, DependencyRegion, GeneratorConfig, IntervalTrackGenerator,
};

const SEEDS: std::ops::Range<u64> = 0..4;

fn pooled(config: &GeneratorConfig, factor: f64) -> CoverageSummary {
    let generator = IntervalTrackGenerator::new(config.clone()).expect("valid config");
    let mut dependent = ConditionalCoverage::default();
    let mut independent = ConditionalCoverage::default();

    for seed in SEEDS {
        let pair = generator
            .generate_pair(factor, &mut seeded_rng(seed))
            .expect("valid factor");
        let query = annosim::coverage::tracks_from_annotations(generator.genome(), &pair.query);
        let summary = CoverageSummary::from_tracks(
            generator.genome(),
            &pair.reference.tracks,
            &query,
            &config.region,
        );
        add(&mut dependent, &summary.dependent);
        add(&mut independent, &summary.independent);
    }

    CoverageSummary {
        dependent,
        independent,
    }
}

fn add(total: &mut ConditionalCoverage, part: &ConditionalCoverage) {
    total.reference_covered += part.reference_covered;
    total.query_given_reference += part.query_given_reference;
    total.reference_uncovered += part.reference_uncovered;
    total.query_given_no_reference += part.query_given_no_reference;
}

fn two_chromosomes() -> GeneratorConfig {
    GeneratorConfig::default()
        .with_chromosome_size(1_000_000)
        .with_chromosome_count(2)
        .with_region(DependencyRegion::WholeChromosome(0))
}

#[test]
fn factor_one_gives_independent_tracks() {
    let summary = pooled(&two_chromosomes(), 1.0);
    for part in [summary.dependent, summary.independent] {
        assert!(part.reference_covered > 0);
        assert!(
            part.gap().abs() < 0.03,
            "conditional fractions diverged: {:.4} vs {:.4}",
            part.p_query_given_reference(),
            part.p_query_given_no_reference()
        );
    }
}

#[test]
fn gap_grows_with_factor_inside_dependent_chromosome() {
    let config = two_chromosomes();
    let gaps: Vec<f64> = [1.0, 1.5, 3.0]
        .into_iter()
        .map(|factor| pooled(&config, factor).dependent.gap())
        .collect();

    assert!(gaps[1] > 0.01, "factor 1.5 gap too small: {:.4}", gaps[1]);
    assert!(gaps[0] < gaps[1] && gaps[1] < gaps[2], "gaps not monotone: {gaps:?}");
}

#[test]
fn independent_chromosome_stays_independent() {
    let summary = pooled(&two_chromosomes(), 3.0);
    assert!(summary.dependent.gap() > 0.05);
    assert!(
        summary.independent.gap().abs() < 0.03,
        "independent chromosome shows dependency: {:.4}",
        summary.independent.gap()
    );
}

#[test]
fn window_policy_limits_dependency_to_the_window() {
    let config = GeneratorConfig::windowed();
    let summary = pooled(&config, 10.0);

    // The window spans the middle tenth of the chromosome.
    assert_eq!(summary.dependent.positions(), SEEDS.end * 100_000);
    assert!(summary.dependent.gap() > 0.1);
    assert!(summary.independent.gap().abs() < 0.03);
}

#[test]
fn nowhere_policy_ignores_the_factor() {
    let config = two_chromosomes().with_region(DependencyRegion::Nowhere);
    let summary = pooled(&config, 10.0);

    assert_eq!(summary.dependent.positions(), 0);
    assert_eq!(summary.independent.positions(), SEEDS.end * 2_000_000);
    assert!(
        summary.independent.gap().abs() < 0.03,
        "factor leaked outside the dependent region: {:.4}",
        summary.independent.gap()
    );
}

#[test]
fn everywhere_policy_couples_every_chromosome() {
    let config = two_chromosomes().with_region(DependencyRegion::Everywhere);
    let generator = IntervalTrackGenerator::new(config.clone()).expect("valid config");
    let pair = generator
        .generate_pair(10.0, &mut seeded_rng(7))
        .expect("valid factor");
    let query = annosim::coverage::tracks_from_annotations(generator.genome(), &pair.query);

    for (id, chrom) in generator.genome().iter().enumerate() {
        let summary = CoverageSummary::from_tracks(
            std::slice::from_ref(chrom),
            &pair.reference.tracks[id..=id],
            &query[id..=id],
            &DependencyRegion::Everywhere,
        );
        assert_eq!(summary.independent.positions(), 0);
        assert!(
            summary.dependent.gap() > 0.1,
            "{} shows no dependency: {:.4}",
            chrom.name,
            summary.dependent.gap()
        );
    }
}
