#![forbid(unsafe_code)]

//! Error taxonomy shared across the Waymark crates.
//!
//! Every error here is local to a step transition or to tour startup; none
//! may cross the host-page boundary as a panic.

/// A measured rectangle was malformed (NaN or negative extent).
#[derive(Debug)]
pub enum GeometryError {
    Invalid { detail: String },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::Invalid { detail } => write!(f, "invalid geometry: {detail}"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// The tour definition document was unusable.
#[derive(Debug)]
pub enum DefinitionError {
    /// The document was not valid JSON or did not match the expected shape.
    Parse(serde_json::Error),
    /// The document parsed but contained no steps.
    Empty,
}

impl From<serde_json::Error> for DefinitionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionError::Parse(err) => write!(f, "tour definition parse error: {err}"),
            DefinitionError::Empty => write!(f, "tour definition has no steps"),
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DefinitionError::Parse(err) => Some(err),
            DefinitionError::Empty => None,
        }
    }
}

/// Fetching the tour definition from its source failed.
#[derive(Debug)]
pub enum FetchError {
    /// The request itself failed (network, I/O).
    Request(String),
    /// The source answered with a non-success status.
    Status(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(detail) => write!(f, "definition fetch failed: {detail}"),
            FetchError::Status(code) => write!(f, "definition fetch returned status {code}"),
        }
    }
}

impl std::error::Error for FetchError {}
