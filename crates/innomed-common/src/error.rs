use thiserror::Error;

#[derive(Debug, Error)]
pub enum InnomedError {
    #[error("Profile build failed: {0}")]
    Build(String),

    #[error("Profile store error: {0}")]
    Store(String),

    #[error("Report generation failed: {0}")]
    Report(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InnomedError {
    /// True for failures of the aggregation pipeline itself (as opposed to
    /// caller mistakes or missing records).
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(
            self,
            InnomedError::Build(_) | InnomedError::Store(_) | InnomedError::Report(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InnomedError>;
