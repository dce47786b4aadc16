use cuprum_pipeline::PipelineError;
use cuprum_warehouse::StoreError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] cuprum_core::ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Pipeline(PipelineError::Extract(_)) => 3,
            Self::Pipeline(PipelineError::Transform(_)) => 4,
            Self::Pipeline(PipelineError::Insight(_)) => 5,
            Self::Store(_) => 6,
            Self::Serialization(_) => 10,
        }
    }
}
