//! Dependent-region policies
//!
//! The query track only depends on the reference track inside the dependent
//! region; everywhere else it is drawn independently. The region is a
//! predicate over `(chromosome id, position)`.

use crate::config::ConfigError;

/// Predicate selecting positions where the query track follows the reference.
pub trait DependentRegion {
    /// Whether `position` on chromosome `chromosome` (0-based id) is dependent.
    ///
    /// `chromosome_size` is supplied for policies expressed as fractions of
    /// the chromosome.
    fn is_dependent(&self, chromosome: usize, position: u64, chromosome_size: u64) -> bool;
}

impl<F> DependentRegion for F
where
    F: Fn(usize, u64) -> bool,
{
    fn is_dependent(&self, chromosome: usize, position: u64, _chromosome_size: u64) -> bool {
        self(chromosome, position)
    }
}

/// Built-in dependent-region policies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DependencyRegion {
    /// Every position of one chromosome.
    WholeChromosome(usize),
    /// Half-open fractional window `[start, end)` of one chromosome.
    Window {
        /// 0-based chromosome id.
        chromosome: usize,
        /// Window start as a fraction of the chromosome size.
        start_fraction: f64,
        /// Window end as a fraction of the chromosome size.
        end_fraction: f64,
    },
    /// Every position of every chromosome.
    Everywhere,
    /// No position; query and reference are independent.
    Nowhere,
}

impl DependencyRegion {
    /// Check the policy against a genome of `chromosome_count` chromosomes.
    pub fn validate(&self, chromosome_count: usize) -> Result<(), ConfigError> {
        match *self {
            DependencyRegion::WholeChromosome(chromosome) => {
                check_chromosome(chromosome, chromosome_count)
            }
            DependencyRegion::Window {
                chromosome,
                start_fraction,
                end_fraction,
            } => {
                check_chromosome(chromosome, chromosome_count)?;
                let ordered = (0.0..=1.0).contains(&start_fraction)
                    && (0.0..=1.0).contains(&end_fraction)
                    && start_fraction < end_fraction;
                if ordered {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidWindow {
                        start: start_fraction,
                        end: end_fraction,
                    })
                }
            }
            DependencyRegion::Everywhere | DependencyRegion::Nowhere => Ok(()),
        }
    }
}

fn check_chromosome(chromosome: usize, count: usize) -> Result<(), ConfigError> {
    if chromosome < count {
        Ok(())
    } else {
        Err(ConfigError::RegionOutOfRange { chromosome, count })
    }
}

impl DependentRegion for DependencyRegion {
    fn is_dependent(&self, chromosome: usize, position: u64, chromosome_size: u64) -> bool {
        match *self {
            DependencyRegion::WholeChromosome(dependent) => chromosome == dependent,
            DependencyRegion::Window {
                chromosome: dependent,
                start_fraction,
                end_fraction,
            } => {
                let pos = position as f64;
                let size = chromosome_size as f64;
                chromosome == dependent && pos >= size * start_fraction && pos < size * end_fraction
            }
            DependencyRegion::Everywhere => true,
            DependencyRegion::Nowhere => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_chromosome_selects_only_that_chromosome() {
        let region = DependencyRegion::WholeChromosome(0);
        assert!(region.is_dependent(0, 0, 100));
        assert!(region.is_dependent(0, 99, 100));
        assert!(!region.is_dependent(1, 50, 100));
    }

    #[test]
    fn window_is_half_open() {
        let region = DependencyRegion::Window {
            chromosome: 0,
            start_fraction: 0.45,
            end_fraction: 0.55,
        };
        assert!(!region.is_dependent(0, 449_999, 1_000_000));
        assert!(region.is_dependent(0, 450_000, 1_000_000));
        assert!(region.is_dependent(0, 549_999, 1_000_000));
        assert!(!region.is_dependent(0, 550_000, 1_000_000));
        assert!(!region.is_dependent(1, 500_000, 1_000_000));
    }

    #[test]
    fn closures_act_as_regions() {
        let even = |chrom: usize, _pos: u64| chrom % 2 == 0;
        assert!(even.is_dependent(2, 10, 100));
        assert!(!even.is_dependent(1, 10, 100));
    }

    #[test]
    fn out_of_range_chromosome_is_rejected() {
        let err = DependencyRegion::WholeChromosome(2).validate(2).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RegionOutOfRange {
                chromosome: 2,
                count: 2
            }
        );
    }
}
