use std::sync::Arc;

/// Named chromosome with its length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    /// Chromosome name, e.g. `chr1`.
    pub name: Arc<str>,
    /// Length in bases.
    pub size: u64,
}

impl Chromosome {
    /// Construct a chromosome.
    pub fn new(name: impl Into<Arc<str>>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// `count` equally sized chromosomes named `chr1..=chrN`.
pub fn simulated_genome(count: usize, size: u64) -> Vec<Chromosome> {
    (1..=count)
        .map(|n| Chromosome::new(format!("chr{n}"), size))
        .collect()
}

/// Half-open annotated region `[begin, end)` on a chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Chromosome name.
    pub chrom: Arc<str>,
    /// 0-based start.
    pub begin: u64,
    /// Exclusive end.
    pub end: u64,
}

impl Interval {
    /// Construct an interval.
    pub fn new(chrom: impl Into<Arc<str>>, begin: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            begin,
            end,
        }
    }

    /// Number of bases covered.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.begin)
    }

    /// True when the interval covers nothing.
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

/// Ordered interval sequence, chromosomes concatenated in genome order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    intervals: Vec<Interval>,
}

impl AnnotationSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already ordered interval list.
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Append intervals of the next chromosome.
    pub fn extend(&mut self, intervals: impl IntoIterator<Item = Interval>) {
        self.intervals.extend(intervals);
    }

    /// Intervals in set order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterate intervals in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True when no interval was placed.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Intervals located on `chrom`, in set order.
    pub fn on_chromosome<'a>(&'a self, chrom: &'a str) -> impl Iterator<Item = &'a Interval> + 'a {
        self.intervals
            .iter()
            .filter(move |interval| &*interval.chrom == chrom)
    }

    /// Total bases covered (intervals never overlap within a set).
    pub fn covered_bases(&self) -> u64 {
        self.intervals.iter().map(Interval::len).sum()
    }

    /// Whether every chromosome's run of intervals is strictly increasing
    /// and non-overlapping.
    pub fn is_sorted_disjoint(&self) -> bool {
        self.intervals.windows(2).all(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            prev.chrom != next.chrom || (prev.begin < next.begin && prev.end <= next.begin)
        })
    }

    /// Consume into the interval list.
    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
