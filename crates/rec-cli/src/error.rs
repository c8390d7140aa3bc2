//! Error types for rec-cli.
//!
//! Every error kind maps to a distinct process exit code so batch callers
//! can tell schema problems from lookup misses from I/O failures.

use recomendar::RecomendarError;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Input table violates the expected schema
    #[error("Invalid input data: {0}")]
    InvalidData(String),

    /// Query song/artist not present in the table
    #[error("{0}")]
    SongNotFound(String),

    /// Matrix file unreadable or corrupt
    #[error("Matrix file error: {0}")]
    MatrixFile(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other recommender error
    #[error("{0}")]
    Recomendar(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::SongNotFound(_) => ExitCode::from(3),
            Self::InvalidData(_) => ExitCode::from(4),
            Self::MatrixFile(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
            Self::Recomendar(_) => ExitCode::from(1),
        }
    }
}

impl From<RecomendarError> for CliError {
    fn from(e: RecomendarError) -> Self {
        match e {
            RecomendarError::MissingColumn { .. } | RecomendarError::InvalidCell { .. } => {
                Self::InvalidData(e.to_string())
            }
            RecomendarError::SongNotFound { .. } => Self::SongNotFound(e.to_string()),
            RecomendarError::FormatError { .. }
            | RecomendarError::UnsupportedVersion { .. }
            | RecomendarError::ChecksumMismatch { .. } => Self::MatrixFile(e.to_string()),
            RecomendarError::Io(io) => Self::Io(io),
            other => Self::Recomendar(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_maps_to_song_not_found() {
        let err: CliError = RecomendarError::SongNotFound {
            name: "x".to_string(),
            artist: "y".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::SongNotFound(_)));
    }

    #[test]
    fn test_schema_error_maps_to_invalid_data() {
        let err: CliError = RecomendarError::missing_column("tempo").into();
        assert!(matches!(err, CliError::InvalidData(_)));
    }

    #[test]
    fn test_checksum_error_maps_to_matrix_file() {
        let err: CliError = RecomendarError::ChecksumMismatch {
            expected: 1,
            actual: 2,
        }
        .into();
        assert!(matches!(err, CliError::MatrixFile(_)));
    }

    #[test]
    fn test_io_error_passthrough() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CliError = RecomendarError::Io(io).into();
        assert!(matches!(err, CliError::Io(_)));
    }
}
