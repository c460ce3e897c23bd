use super::error::DispatchError;
use super::model::{Phrase, StoreRef, SynthesisJob};
use crate::infrastructure::repositories::SynthesisRepository;
use std::sync::Arc;

/// Polly accepts at most 100,000 characters per asynchronous synthesis task
pub const MAX_PHRASE_LENGTH: usize = 100_000;

/// Starts one synthesis job per phrase.
///
/// The engine writes the audio straight into the target bucket; only the job
/// descriptor comes back here. There is no local retry.
pub struct SynthesisDispatcher {
    synthesis_repo: Arc<dyn SynthesisRepository>,
    voice_id: String,
}

impl SynthesisDispatcher {
    pub fn new(synthesis_repo: Arc<dyn SynthesisRepository>, voice_id: String) -> Self {
        Self {
            synthesis_repo,
            voice_id,
        }
    }

    pub async fn dispatch(
        &self,
        phrase: &Phrase,
        output_target: &StoreRef,
    ) -> Result<SynthesisJob, DispatchError> {
        let length = phrase.len();
        if length > MAX_PHRASE_LENGTH {
            return Err(DispatchError::PhraseTooLong {
                length,
                limit: MAX_PHRASE_LENGTH,
            });
        }

        let task = self
            .synthesis_repo
            .start_synthesis(
                phrase.as_str(),
                &output_target.bucket,
                &output_target.key_prefix,
                &self.voice_id,
            )
            .await
            .map_err(DispatchError::Engine)?;

        let job_id = task
            .task_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DispatchError::MalformedResponse("missing task id".to_string()))?;
        let output_uri = task.output_uri.filter(|uri| !uri.is_empty()).ok_or_else(|| {
            DispatchError::MalformedResponse(format!("task {} has no output uri", job_id))
        })?;

        tracing::debug!(
            job_id = %job_id,
            output_uri = %output_uri,
            bucket = %output_target.bucket,
            "Synthesis job dispatched"
        );

        Ok(SynthesisJob {
            job_id,
            output_uri,
            phrase: phrase.clone(),
        })
    }
}
