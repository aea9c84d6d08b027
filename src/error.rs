use thiserror::Error;

/// Why an imported pattern file was rejected. The current pattern is left as it was.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not a pattern file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("pattern file has no grid")]
    MissingGrid,

    #[error("pattern grid is not an array")]
    GridNotArray,

    #[error("pattern file does not match the pattern format: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("failed to read pattern file: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors that can occur while producing an export file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to serialize pattern: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during gesture state transitions
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
}
