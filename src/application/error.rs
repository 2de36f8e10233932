// Errors surfaced by the visual use cases
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisualError {
    #[error("unknown visual: {0}")]
    UnknownVisual(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] config::ConfigError),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}
