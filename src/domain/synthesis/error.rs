/// Failure of a single phrase's synthesis dispatch.
///
/// Never aborts a batch: the orchestrator records it against the phrase and
/// moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("synthesis engine error: {0}")]
    Engine(String),
    #[error("malformed synthesis response: {0}")]
    MalformedResponse(String),
    #[error("phrase too long: {length} characters (limit {limit})")]
    PhraseTooLong { length: usize, limit: usize },
}
