use std::fmt;

/// Which track of a run a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackRole {
    /// Independently generated track.
    Reference,
    /// Track generated conditionally on the reference.
    Query,
}

impl TrackRole {
    /// File name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            TrackRole::Reference => "ref",
            TrackRole::Query => "query",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ref" => Some(TrackRole::Reference),
            "query" => Some(TrackRole::Query),
            _ => None,
        }
    }
}

impl fmt::Display for TrackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackRole::Reference => f.write_str("Reference"),
            TrackRole::Query => f.write_str("Query"),
        }
    }
}

/// Dependency factor as written in file names and labels.
///
/// Integral values keep one decimal (`2.0`); others use the shortest
/// representation that parses back to the same `f64`.
pub fn format_factor(factor: f64) -> String {
    if factor.fract() == 0.0 && factor.abs() < 1e15 {
        format!("{factor:.1}")
    } else {
        format!("{factor}")
    }
}

/// Identity of one generated annotation file.
///
/// The file name `<role>_depfac<factor>_<run>.bed` maps one-to-one onto
/// `(role, factor, run)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunFile {
    /// Reference or query.
    pub role: TrackRole,
    /// Dependency factor of the run.
    pub dependency_factor: f64,
    /// Replicate id, starting at 1.
    pub run: u32,
}

impl RunFile {
    /// Construct a run file identity.
    pub fn new(role: TrackRole, dependency_factor: f64, run: u32) -> Self {
        Self {
            role,
            dependency_factor,
            run,
        }
    }

    /// Label shared by the reference and query file of a run.
    pub fn label(&self) -> String {
        format!("depfac{}_{}", format_factor(self.dependency_factor), self.run)
    }

    /// File name inside the output directory.
    pub fn file_name(&self) -> String {
        format!("{}_{}.bed", self.role.prefix(), self.label())
    }

    /// The other track of the same run.
    pub fn partner(&self) -> Self {
        let role = match self.role {
            TrackRole::Reference => TrackRole::Query,
            TrackRole::Query => TrackRole::Reference,
        };
        Self { role, ..*self }
    }

    /// Recover the identity from a file name produced by [`RunFile::file_name`].
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".bed")?;
        let (prefix, label) = stem.split_once('_')?;
        let role = TrackRole::from_prefix(prefix)?;
        let (factor_text, run_text) = label.strip_prefix("depfac")?.rsplit_once('_')?;
        let dependency_factor: f64 = factor_text.parse().ok()?;
        let run: u32 = run_text.parse().ok()?;
        // Reject spellings the writer would never produce, e.g. `1.50`.
        if format_factor(dependency_factor) != factor_text || run.to_string() != run_text {
            return None;
        }
        Some(Self::new(role, dependency_factor, run))
    }
}
