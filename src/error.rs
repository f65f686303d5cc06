use thiserror::Error;

/// Error taxonomy of this crate.
///
/// Every failure here is a caller or data error, not a transient condition,
/// so nothing is ever retried internally. Empty clusters during a centroid
/// update are *not* an error; they are tolerated (see [`crate::KMeans::run`]).
#[derive(Debug, Error)]
pub enum QuakeMeansError {
    /// A parameter was outside its usable range (e.g. `k == 0`,
    /// `k > |points|`, `repeats == 0`, empty point set).
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// A point or centroid did not match the dimensionality of the set it
    /// was used with.
    #[error("dimension mismatch: expected {expected} components, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A row of a USGS CSV export could not be parsed.
    #[error("malformed record on line {line}")]
    MalformedRecord { line: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuakeMeansError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        QuakeMeansError::InvalidParameter { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, QuakeMeansError>;
