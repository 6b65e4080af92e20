use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] pairdex_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error("snapshot generation failed: {0}")]
    Snapshot(#[from] pairdex_core::FetchError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Snapshot(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
