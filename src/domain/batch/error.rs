use crate::error::AppError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum BatchServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("notification sink unavailable for run {run_id}: {reason}")]
    SinkUnavailable { run_id: Uuid, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<BatchServiceError> for AppError {
    fn from(err: BatchServiceError) -> Self {
        match err {
            BatchServiceError::Invalid(msg) => AppError::BadRequest(msg),
            BatchServiceError::SinkUnavailable { run_id, reason } => {
                AppError::SinkUnavailable(format!("run {}: {}", run_id, reason))
            }
            BatchServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
