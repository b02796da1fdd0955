//! Generate one reference/query pair and report how strongly the query
//! follows the reference inside and outside the dependent chromosome.

use annosim::generator::seeded_rng;
use annosim::{CoverageSummary, GeneratorConfig, IntervalTrackGenerator};

fn main() -> anyhow::Result<()> {
    let config = GeneratorConfig::default();
    let generator = IntervalTrackGenerator::new(config.clone())?;

    for factor in [1.0, 1.5, 2.0] {
        let pair = generator.generate_pair(factor, &mut seeded_rng(42))?;
        let summary = CoverageSummary::from_annotations(
            generator.genome(),
            &pair.reference.annotations,
            &pair.query,
            &config.region,
        );
        println!(
            "factor {factor:.1}: reference={} query={} dependent gap={:.4} independent gap={:.4}",
            pair.reference.annotations.len(),
            pair.query.len(),
            summary.dependent.gap(),
            summary.independent.gap()
        );
    }

    Ok(())
}
