use thiserror::Error;

/// Failure taxonomy shared by the roster sources and the stats pipeline.
///
/// Per-row problems during parsing are not errors; they travel as
/// [`SkippedRow`](crate::ingest::SkippedRow) diagnostics next to the
/// records that did parse.
#[derive(Debug, Error)]
pub enum CoachError {
    /// The source location could not be reached at all (network, I/O).
    #[error("source unavailable: {detail}")]
    SourceUnavailable { detail: String },

    /// The source answered but the expected tables/fields are absent.
    #[error("schema mismatch: {detail}")]
    SchemaMismatch { detail: String },

    /// A remote call came back with a non-success HTTP status.
    #[error("remote call failed with HTTP {status}")]
    RemoteError { status: u16 },

    /// The call chain succeeded but yielded nothing usable for this handle.
    #[error("not enough game data for '{handle}'")]
    InsufficientData { handle: String },
}

impl CoachError {
    pub fn unavailable(detail: impl ToString) -> Self {
        CoachError::SourceUnavailable {
            detail: detail.to_string(),
        }
    }

    pub fn schema(detail: impl ToString) -> Self {
        CoachError::SchemaMismatch {
            detail: detail.to_string(),
        }
    }

    pub fn remote(status: reqwest::StatusCode) -> Self {
        CoachError::RemoteError {
            status: status.as_u16(),
        }
    }

    pub fn insufficient(handle: impl ToString) -> Self {
        CoachError::InsufficientData {
            handle: handle.to_string(),
        }
    }
}
