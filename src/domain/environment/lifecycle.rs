use super::error::EnvironmentError;
use super::model::{Environment, RemovalPolicy};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// A resource that holds data owned by a single environment.
#[async_trait]
pub trait StatefulResource: Send + Sync {
    /// Human-readable name used in logs and reports.
    fn name(&self) -> String;

    /// Delete every piece of data this resource holds for `environment`.
    ///
    /// Returns the number of items removed.
    async fn purge(&self, environment: &Environment) -> Result<u64, String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct TeardownReport {
    pub environment: String,
    pub policy: RemovalPolicy,
    pub retained: Vec<String>,
    pub purged: Vec<PurgedResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurgedResource {
    pub name: String,
    pub items: u64,
}

pub struct LifecycleService {
    resources: Vec<Arc<dyn StatefulResource>>,
}

impl LifecycleService {
    pub fn new(resources: Vec<Arc<dyn StatefulResource>>) -> Self {
        Self { resources }
    }
}

#[async_trait]
pub trait LifecycleServiceApi: Send + Sync {
    /// Apply the environment's removal policy to all of its stateful resources.
    ///
    /// The shared notification sink is never a stateful resource of an
    /// environment and is left alone.
    async fn teardown(&self, environment: &Environment)
        -> Result<TeardownReport, EnvironmentError>;
}

#[async_trait]
impl LifecycleServiceApi for LifecycleService {
    async fn teardown(
        &self,
        environment: &Environment,
    ) -> Result<TeardownReport, EnvironmentError> {
        let policy = environment.removal_policy();
        let mut report = TeardownReport {
            environment: environment.id.clone(),
            policy,
            retained: Vec::new(),
            purged: Vec::new(),
        };

        if policy == RemovalPolicy::Retain {
            for resource in &self.resources {
                tracing::info!(
                    environment = %environment.id,
                    resource = %resource.name(),
                    "Retaining resource data on teardown"
                );
                report.retained.push(resource.name());
            }
            return Ok(report);
        }

        let mut failures = Vec::new();
        for resource in &self.resources {
            match resource.purge(environment).await {
                Ok(items) => {
                    tracing::info!(
                        environment = %environment.id,
                        resource = %resource.name(),
                        items_removed = items,
                        "Resource data purged"
                    );
                    report.purged.push(PurgedResource {
                        name: resource.name(),
                        items,
                    });
                }
                Err(e) => {
                    tracing::error!(
                        environment = %environment.id,
                        resource = %resource.name(),
                        error = %e,
                        "Failed to purge resource data"
                    );
                    failures.push(format!("{}: {}", resource.name(), e));
                }
            }
        }

        if !failures.is_empty() {
            return Err(EnvironmentError::Dependency(failures.join("; ")));
        }

        Ok(report)
    }
}
