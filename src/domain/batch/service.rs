use super::error::BatchServiceError;
use super::model::{BatchReport, BatchRequest, ItemOutcome, ItemResult, RunState};
use crate::domain::audit::{audit_day, AuditRecord};
use crate::domain::environment::{Environment, SinkRef};
use crate::domain::synthesis::{Phrase, StoreRef, SynthesisDispatcher};
use crate::infrastructure::repositories::{AuditRepository, NotificationRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

/// Ceiling on simultaneous synthesis calls per run, set by the engine's own
/// throughput limits.
pub const MAX_IN_FLIGHT: usize = 5;

pub struct BatchOrchestrator {
    dispatcher: Arc<SynthesisDispatcher>,
    audit_repo: Arc<dyn AuditRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    sink: SinkRef,
    output_target: StoreRef,
    environment: Environment,
}

impl BatchOrchestrator {
    pub fn new(
        dispatcher: Arc<SynthesisDispatcher>,
        audit_repo: Arc<dyn AuditRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        sink: SinkRef,
        output_target: StoreRef,
        environment: Environment,
    ) -> Self {
        Self {
            dispatcher,
            audit_repo,
            notification_repo,
            sink,
            output_target,
            environment,
        }
    }
}

#[async_trait]
pub trait BatchOrchestratorApi: Send + Sync {
    /// Run a batch to completion.
    ///
    /// This operation:
    /// - Dispatches every phrase, at most `MAX_IN_FLIGHT` at a time
    /// - Writes one audit record per successful dispatch
    /// - Waits for every dispatch to resolve, then publishes the trigger
    ///   payload to the notification sink exactly once
    ///
    /// Item failures are recorded in the report and never abort the run. The
    /// notification is sent even if every item failed. Only a failed publish
    /// fails the run.
    async fn run(&self, request: BatchRequest) -> Result<BatchReport, BatchServiceError>;
}

#[async_trait]
impl BatchOrchestratorApi for BatchOrchestrator {
    async fn run(&self, request: BatchRequest) -> Result<BatchReport, BatchServiceError> {
        self.run_started_at(request, Utc::now()).await
    }
}

impl BatchOrchestrator {
    /// Run a batch whose start time is `started_at`. Every audit record of the
    /// run carries the day of this timestamp.
    pub async fn run_started_at(
        &self,
        request: BatchRequest,
        started_at: DateTime<Utc>,
    ) -> Result<BatchReport, BatchServiceError> {
        let run_id = Uuid::new_v4();
        let day = audit_day(started_at);
        let span = tracing::info_span!(
            "batch_run",
            run_id = %run_id,
            day = %day,
            environment = %self.environment.id,
        );

        async move {
            tracing::info!(
                state = %RunState::Idle,
                phrase_count = request.phrases.len(),
                "Batch run received"
            );

            let outcomes = if request.phrases.is_empty() {
                Vec::new()
            } else {
                tracing::info!(state = %RunState::Dispatching, "Dispatching phrases");
                self.fan_out(&request.phrases, &day).await
            };

            let recorded = outcomes
                .iter()
                .filter(|o| matches!(o.result, ItemResult::Recorded(_)))
                .count();
            tracing::info!(
                state = %RunState::Completing,
                recorded = recorded,
                failed = outcomes.len() - recorded,
                "All dispatches resolved"
            );

            let mut report = BatchReport {
                run_id,
                day: day.clone(),
                started_at,
                state: RunState::Completing,
                outcomes,
            };

            if let Err(reason) = self.notify(&request).await {
                report.state = RunState::Failed;
                tracing::error!(
                    state = %report.state,
                    topic_arn = %self.sink.arn,
                    error = %reason,
                    "Completion notification failed"
                );
                return Err(BatchServiceError::SinkUnavailable { run_id, reason });
            }

            report.state = RunState::Done;
            tracing::info!(state = %report.state, "Batch run completed");

            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Dispatch every phrase with bounded concurrency and wait for all of them.
    async fn fan_out(&self, phrases: &[Phrase], day: &str) -> Vec<ItemOutcome> {
        let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));
        let mut tasks = JoinSet::new();

        for (index, phrase) in phrases.iter().cloned().enumerate() {
            // A closed semaphore is impossible here: it is never closed.
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let dispatcher = self.dispatcher.clone();
            let audit_repo = self.audit_repo.clone();
            let output_target = self.output_target.clone();
            let day = day.to_string();

            tasks.spawn(
                async move {
                    let result =
                        process_item(&dispatcher, audit_repo.as_ref(), &phrase, &output_target, &day)
                            .await;
                    drop(permit);
                    ItemOutcome {
                        index,
                        phrase,
                        result,
                    }
                }
                .in_current_span(),
            );
        }

        let mut slots: Vec<Option<ItemOutcome>> = vec![None; phrases.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    let index = outcome.index;
                    slots[index] = Some(outcome);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Phrase task aborted");
                }
            }
        }

        slots
            .into_iter()
            .zip(phrases.iter())
            .enumerate()
            .map(|(index, (slot, phrase))| {
                slot.unwrap_or_else(|| ItemOutcome {
                    index,
                    phrase: phrase.clone(),
                    result: ItemResult::Aborted,
                })
            })
            .collect()
    }

    async fn notify(&self, request: &BatchRequest) -> Result<(), String> {
        let message = serde_json::to_string(&request.payload)
            .map_err(|e| format!("Failed to serialize notification payload: {}", e))?;

        let message_id = self.notification_repo.publish(&self.sink, &message).await?;

        tracing::info!(
            topic_arn = %self.sink.arn,
            message_id = %message_id,
            "Completion notification published"
        );

        Ok(())
    }
}

/// Dispatch one phrase and, on success, record it. The caller's concurrency
/// slot stays held until the audit write has resolved.
async fn process_item(
    dispatcher: &SynthesisDispatcher,
    audit_repo: &dyn AuditRepository,
    phrase: &Phrase,
    output_target: &StoreRef,
    day: &str,
) -> ItemResult {
    let job = match dispatcher.dispatch(phrase, output_target).await {
        Ok(job) => job,
        Err(e) => {
            tracing::warn!(
                error = %e,
                phrase_length = phrase.len(),
                "Synthesis dispatch failed, skipping audit record"
            );
            return ItemResult::DispatchFailed(e.to_string());
        }
    };

    let record = AuditRecord::from_job(day, &job);
    match audit_repo.put(&record).await {
        Ok(()) => {
            tracing::info!(
                task_id = %record.task_id,
                output_uri = %record.output_uri,
                "Audit record written"
            );
            ItemResult::Recorded(job)
        }
        Err(reason) => {
            tracing::error!(
                task_id = %record.task_id,
                error = %reason,
                "Failed to write audit record"
            );
            ItemResult::AuditFailed { job, reason }
        }
    }
}
