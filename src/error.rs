use thiserror::Error;

/// Convenience result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Error type returned by report reading and parsing.
///
/// Only whole-batch failures end up here. A row whose fields fail coercion is dropped from the
/// output and described by a [`FieldError`] instead.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// There is no header row to work with.
    #[error("no records")]
    EmptyInput,

    /// The header row lacks one or more of the required column labels.
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

impl ReportError {
    /// Returns `true` for the two structural failures raised by the parser itself, as opposed to
    /// errors coming from reading the source.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::MissingColumns { .. })
    }
}

/// A single field that could not be coerced to its column type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid dealer_code '{raw}': expected a non-negative base-10 integer")]
    InvalidDealerCode { raw: String },

    #[error("invalid created '{raw}': expected YYYY-MM-DD HH:MM:SS[.fff]")]
    InvalidCreated { raw: String },
}
