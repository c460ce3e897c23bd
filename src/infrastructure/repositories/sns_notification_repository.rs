use super::notification_repository::{NotificationRepository, TopicProvisioner};
use crate::domain::environment::SinkRef;
use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use std::sync::Arc;

/// AWS SNS implementation of the notification sink
pub struct SnsNotificationRepository {
    sns_client: Arc<SnsClient>,
}

impl SnsNotificationRepository {
    pub fn new(sns_client: Arc<SnsClient>) -> Self {
        Self { sns_client }
    }
}

#[async_trait]
impl NotificationRepository for SnsNotificationRepository {
    async fn publish(&self, sink: &SinkRef, message: &str) -> Result<String, String> {
        let result = self
            .sns_client
            .publish()
            .topic_arn(&sink.arn)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    topic_arn = %sink.arn,
                    message_length = message.len(),
                    "AWS SNS publish failed"
                );
                format!("AWS SNS error: {}", e)
            })?;

        Ok(result.message_id().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl TopicProvisioner for SnsNotificationRepository {
    async fn create_topic(&self, name: &str) -> Result<String, String> {
        let result = self
            .sns_client
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, topic_name = name, "AWS SNS create_topic failed");
                format!("AWS SNS error: {}", e)
            })?;

        result
            .topic_arn()
            .map(str::to_string)
            .ok_or_else(|| format!("AWS SNS returned no ARN for topic '{}'", name))
    }

    async fn topic_exists(&self, arn: &str) -> Result<bool, String> {
        match self
            .sns_client
            .get_topic_attributes()
            .topic_arn(arn)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    Ok(false)
                } else {
                    tracing::error!(error = ?e, topic_arn = arn, "AWS SNS get_topic_attributes failed");
                    Err(format!("AWS SNS error: {}", e))
                }
            }
        }
    }
}
