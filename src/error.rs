//! Error types for recomendar operations.
//!
//! Provides one error kind per failure condition so callers can react to
//! typed failures instead of guessing from a generic exception.

use std::fmt;

/// Main error type for recomendar operations.
///
/// # Examples
///
/// ```
/// use recomendar::error::RecomendarError;
///
/// let err = RecomendarError::MissingColumn {
///     column: "tempo".to_string(),
/// };
/// assert!(err.to_string().contains("tempo"));
/// ```
#[derive(Debug)]
pub enum RecomendarError {
    /// Required column absent from the input table.
    MissingColumn {
        /// Column name
        column: String,
    },

    /// A cell could not be parsed as the column's declared type.
    InvalidCell {
        /// Column name
        column: String,
        /// Zero-based data row (header excluded)
        row: usize,
        /// Offending cell contents
        value: String,
    },

    /// Query (song, artist) pair not present in the table.
    SongNotFound {
        /// Queried song name
        name: String,
        /// Queried artist name
        artist: String,
    },

    /// Encoder or pipeline used before fitting.
    NotFitted {
        /// Component that was not fitted
        what: String,
    },

    /// Table/matrix dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid or corrupt matrix file.
    FormatError {
        /// Error description
        message: String,
    },

    /// Unsupported matrix format version.
    UnsupportedVersion {
        /// Version found
        found: u32,
        /// Maximum supported version
        supported: u32,
    },

    /// Checksum verification failed.
    ChecksumMismatch {
        /// Expected checksum
        expected: u32,
        /// Actual checksum
        actual: u32,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for RecomendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecomendarError::MissingColumn { column } => {
                write!(f, "Missing required column: {column}")
            }
            RecomendarError::InvalidCell { column, row, value } => {
                write!(f, "Invalid value in column {column}, row {row}: {value:?}")
            }
            RecomendarError::SongNotFound { name, artist } => {
                write!(f, "Song not found: {name:?} by {artist:?}")
            }
            RecomendarError::NotFitted { what } => {
                write!(f, "{what} not fitted. Call fit() first")
            }
            RecomendarError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            RecomendarError::FormatError { message } => {
                write!(f, "Invalid matrix format: {message}")
            }
            RecomendarError::UnsupportedVersion { found, supported } => {
                write!(
                    f,
                    "Unsupported format version: found {found}, max supported {supported}"
                )
            }
            RecomendarError::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "Checksum mismatch: expected 0x{expected:08X}, got 0x{actual:08X}"
                )
            }
            RecomendarError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            RecomendarError::Io(e) => write!(f, "I/O error: {e}"),
            RecomendarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RecomendarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecomendarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RecomendarError {
    fn from(err: std::io::Error) -> Self {
        RecomendarError::Io(err)
    }
}

impl From<&str> for RecomendarError {
    fn from(msg: &str) -> Self {
        RecomendarError::Other(msg.to_string())
    }
}

impl From<String> for RecomendarError {
    fn from(msg: String) -> Self {
        RecomendarError::Other(msg)
    }
}

impl RecomendarError {
    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create a not-fitted error for a named component.
    #[must_use]
    pub fn not_fitted(what: &str) -> Self {
        Self::NotFitted {
            what: what.to_string(),
        }
    }

    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecomendarError>;
