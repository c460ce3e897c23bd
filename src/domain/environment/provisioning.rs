use super::error::EnvironmentError;
use super::model::{Environment, SinkOwnership, SinkRef};
use crate::infrastructure::repositories::{SharedResourceCatalog, TopicProvisioner};
use async_trait::async_trait;
use std::sync::Arc;

/// Bootstraps the resources shared by every environment.
///
/// The trunk owns the notification sink and publishes its reference under a
/// well-known export name; every other environment imports that reference.
pub struct ProvisioningService {
    catalog: Arc<dyn SharedResourceCatalog>,
    provisioner: Arc<dyn TopicProvisioner>,
    topic_name: String,
    export_name: String,
}

impl ProvisioningService {
    pub fn new(
        catalog: Arc<dyn SharedResourceCatalog>,
        provisioner: Arc<dyn TopicProvisioner>,
        topic_name: String,
        export_name: String,
    ) -> Self {
        Self {
            catalog,
            provisioner,
            topic_name,
            export_name,
        }
    }
}

#[async_trait]
pub trait ProvisioningServiceApi: Send + Sync {
    /// Resolve the shared notification sink for an environment.
    ///
    /// For the trunk this creates the sink when no live one is registered and
    /// is safe to run repeatedly. For any other environment the sink must
    /// already exist; a missing export fails fast.
    async fn ensure_notification_sink(
        &self,
        environment: &Environment,
    ) -> Result<SinkRef, EnvironmentError>;
}

#[async_trait]
impl ProvisioningServiceApi for ProvisioningService {
    async fn ensure_notification_sink(
        &self,
        environment: &Environment,
    ) -> Result<SinkRef, EnvironmentError> {
        if environment.is_trunk {
            self.bootstrap_trunk_sink(environment).await
        } else {
            self.import_sink(environment).await
        }
    }
}

impl ProvisioningService {
    async fn bootstrap_trunk_sink(
        &self,
        environment: &Environment,
    ) -> Result<SinkRef, EnvironmentError> {
        if let Some(arn) = self.lookup_export().await? {
            if self.topic_exists(&arn).await? {
                tracing::info!(
                    environment = %environment.id,
                    topic_arn = %arn,
                    "Shared notification sink already registered, reusing it"
                );
                return Ok(SinkRef {
                    arn,
                    ownership: SinkOwnership::Owned,
                });
            }

            tracing::warn!(
                environment = %environment.id,
                topic_arn = %arn,
                "Registered notification sink no longer exists, recreating it"
            );
        }

        let arn = self
            .provisioner
            .create_topic(&self.topic_name)
            .await
            .map_err(EnvironmentError::Dependency)?;

        self.catalog
            .register(&self.export_name, &arn, &environment.id)
            .await
            .map_err(EnvironmentError::Dependency)?;

        tracing::info!(
            environment = %environment.id,
            topic_name = %self.topic_name,
            export_name = %self.export_name,
            topic_arn = %arn,
            "Shared notification sink created and exported"
        );

        Ok(SinkRef {
            arn,
            ownership: SinkOwnership::Owned,
        })
    }

    async fn import_sink(&self, environment: &Environment) -> Result<SinkRef, EnvironmentError> {
        let arn = self.lookup_export().await?.ok_or_else(|| {
            EnvironmentError::SharedResourceMissing(format!(
                "export '{}' is not registered; deploy the trunk first",
                self.export_name
            ))
        })?;

        if !self.topic_exists(&arn).await? {
            return Err(EnvironmentError::SharedResourceMissing(format!(
                "export '{}' points at '{}', which no longer exists",
                self.export_name, arn
            )));
        }

        tracing::info!(
            environment = %environment.id,
            export_name = %self.export_name,
            topic_arn = %arn,
            "Shared notification sink imported"
        );

        Ok(SinkRef {
            arn,
            ownership: SinkOwnership::Imported,
        })
    }

    async fn lookup_export(&self) -> Result<Option<String>, EnvironmentError> {
        self.catalog
            .lookup(&self.export_name)
            .await
            .map_err(EnvironmentError::Dependency)
    }

    async fn topic_exists(&self, arn: &str) -> Result<bool, EnvironmentError> {
        self.provisioner
            .topic_exists(arn)
            .await
            .map_err(EnvironmentError::Dependency)
    }
}
