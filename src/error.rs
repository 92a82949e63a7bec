//! Error types for the load path.

use thiserror::Error;

/// Why a load attempt failed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a status outside the 2xx class.
    #[error("Network response was not ok")]
    Status(u16),

    /// The request could not be sent or the body could not be read.
    #[error("Failed to fetch: {0}")]
    Request(#[from] wreq::Error),

    /// The body is not valid JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// The body is the JSON literal `null`.
    #[error("Cannot read properties of null (reading 'image')")]
    NullBody,

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl LoadError {
    /// Conventional error name printed ahead of the message in the log line.
    pub fn name(&self) -> &'static str {
        match self {
            LoadError::Status(_) => "Error",
            LoadError::Parse(_) => "SyntaxError",
            LoadError::Request(_) | LoadError::NullBody | LoadError::Render(_) => "TypeError",
        }
    }
}

/// A presentation target could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("presentation target '{0}' not found")]
    MissingTarget(String),

    #[error("presentation target '{id}' has the wrong kind (expected {expected})")]
    WrongKind { id: String, expected: &'static str },
}
