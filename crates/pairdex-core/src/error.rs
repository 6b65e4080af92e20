use thiserror::Error;

use crate::http_client::HttpError;

/// Validation and contract errors exposed by `pairdex-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pair display name cannot be empty")]
    EmptyDisplay,

    #[error("invalid exchange '{value}', expected one of coinbase, kraken")]
    InvalidExchange { value: String },
}

/// Failure of a single resolution tier.
///
/// A cache miss is not represented here; missing or stale cache entries are
/// the expected cold path and only surface as debug logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("upstream reported errors: {}", .0.join("; "))]
    Upstream(Vec<String>),

    #[error("snapshot read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Stable machine-readable code for logs and report warnings.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "fetch.transport",
            Self::Status(_) => "fetch.status",
            Self::Malformed(_) => "fetch.malformed",
            Self::Upstream(_) => "fetch.upstream",
            Self::Io(_) => "fetch.io",
        }
    }
}
