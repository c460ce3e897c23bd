use async_trait::async_trait;

/// Descriptor returned by the engine when it accepts a synthesis task.
///
/// Fields are optional because the engine does not guarantee them; the
/// dispatcher decides what a usable response is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisTask {
    pub task_id: Option<String>,
    pub output_uri: Option<String>,
}

/// Repository for asynchronous speech synthesis.
/// Abstracts the underlying engine (AWS Polly today).
///
/// Implementations start a task that writes MP3 output straight into the
/// given bucket and return as soon as the engine has accepted it. They must
/// not retry.
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Start synthesizing `text` with `voice_id` into `output_bucket`,
    /// under keys starting with `key_prefix`
    ///
    /// # Errors
    /// Returns error if the engine rejects the task or is unavailable
    async fn start_synthesis(
        &self,
        text: &str,
        output_bucket: &str,
        key_prefix: &str,
        voice_id: &str,
    ) -> Result<SynthesisTask, String>;
}
