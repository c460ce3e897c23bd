use crate::domain::environment::SinkRef;
use async_trait::async_trait;

/// Publish-only broadcast channel.
///
/// Publishers never coordinate with each other; the sink must accept
/// concurrent, unordered publishes from every environment sharing it.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Publish `message` to every current subscriber of `sink`
    ///
    /// Returns the sink-assigned message id. No retry is attempted.
    async fn publish(&self, sink: &SinkRef, message: &str) -> Result<String, String>;
}

/// Creates and inspects notification sinks. Only the trunk bootstrap uses
/// `create_topic`.
#[async_trait]
pub trait TopicProvisioner: Send + Sync {
    /// Create the topic, returning its ARN. Creating an existing topic name
    /// returns the existing ARN.
    async fn create_topic(&self, name: &str) -> Result<String, String>;

    async fn topic_exists(&self, arn: &str) -> Result<bool, String>;
}
