use thiserror::Error;

/// Failure modes of the decode → resolve → aggregate pipeline.
///
/// None of these are recovered internally: every variant aborts the run.
#[derive(Error, Debug)]
pub enum OuiCountError {
    /// Input record is not exactly one string of decimal digits.
    #[error("malformed record {record:?}: {reason}")]
    MalformedRecord { record: String, reason: String },

    /// Decimal value does not fit in 48 bits.
    #[error("numeric value of {record:?} exceeds MAC range (6 bytes)")]
    OutOfRange { record: String },

    /// A `(hex)` registry line whose prefix is not three hex byte groups.
    #[error("malformed registry line {line_no}: {line:?}")]
    MalformedRegistryLine { line_no: usize, line: String },

    /// Downloading the registry file failed.
    #[error("failed to fetch OUI registry from {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// A record failed to decode; wraps the decode error with its position.
    #[error("line {line_no}: {source}")]
    AtLine {
        line_no: usize,
        #[source]
        source: Box<OuiCountError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OuiCountError {
    /// The underlying error, with any line-position wrapper stripped.
    pub fn root(&self) -> &OuiCountError {
        match self {
            OuiCountError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}
