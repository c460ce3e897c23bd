use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("shared resource not found: {0}")]
    SharedResourceMissing(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<EnvironmentError> for AppError {
    fn from(err: EnvironmentError) -> Self {
        match err {
            EnvironmentError::Configuration(msg) => AppError::Configuration(msg),
            EnvironmentError::SharedResourceMissing(msg) => {
                AppError::Configuration(format!("shared resource not found: {}", msg))
            }
            EnvironmentError::Dependency(msg) => AppError::ExternalService(msg),
            EnvironmentError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
