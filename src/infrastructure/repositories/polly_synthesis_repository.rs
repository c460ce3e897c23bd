use super::synthesis_repository::{SynthesisRepository, SynthesisTask};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of the synthesis repository, backed by
/// `StartSpeechSynthesisTask`
pub struct PollySynthesisRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySynthesisRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }
}

#[async_trait]
impl SynthesisRepository for PollySynthesisRepository {
    async fn start_synthesis(
        &self,
        text: &str,
        output_bucket: &str,
        key_prefix: &str,
        voice_id: &str,
    ) -> Result<SynthesisTask, String> {
        let start_time = std::time::Instant::now();
        let voice = VoiceId::from(voice_id);
        let text_preview: String = text.chars().take(200).collect();

        tracing::info!(
            voice = voice_id,
            output_format = "Mp3",
            output_bucket = output_bucket,
            key_prefix = key_prefix,
            text_length = text.len(),
            text_preview = %text_preview,
            "Calling AWS Polly start_speech_synthesis_task"
        );

        let result = self
            .polly_client
            .start_speech_synthesis_task()
            .text(text)
            .voice_id(voice)
            .output_format(OutputFormat::Mp3)
            .output_s3_bucket_name(output_bucket)
            .set_output_s3_key_prefix((!key_prefix.is_empty()).then(|| key_prefix.to_string()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = voice_id,
                    output_bucket = output_bucket,
                    text_length = text.len(),
                    "AWS Polly start_speech_synthesis_task failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let task = result.synthesis_task();
        let synthesis_task = SynthesisTask {
            task_id: task.and_then(|t| t.task_id()).map(str::to_string),
            output_uri: task.and_then(|t| t.output_uri()).map(str::to_string),
        };

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            task_id = ?synthesis_task.task_id,
            output_uri = ?synthesis_task.output_uri,
            "Synthesis task started"
        );

        Ok(synthesis_task)
    }
}
