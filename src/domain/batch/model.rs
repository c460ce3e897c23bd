use super::error::BatchServiceError;
use crate::domain::synthesis::{Phrase, SynthesisJob};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// An inbound batch: the phrases to synthesize plus the raw trigger payload,
/// which is forwarded untouched to the notification sink.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub phrases: Vec<Phrase>,
    pub payload: Value,
}

impl BatchRequest {
    /// Build a batch from a trigger payload of the form `{"phrases": [...]}`.
    ///
    /// `phrases` must be present and be an array of strings. Empty strings are
    /// accepted and skipped.
    pub fn from_payload(payload: Value) -> Result<Self, BatchServiceError> {
        let items = payload
            .get("phrases")
            .ok_or_else(|| BatchServiceError::Invalid("missing field `phrases`".to_string()))?
            .as_array()
            .ok_or_else(|| {
                BatchServiceError::Invalid("`phrases` must be an array of strings".to_string())
            })?;

        let mut phrases = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let text = item.as_str().ok_or_else(|| {
                BatchServiceError::Invalid(format!("`phrases[{}]` is not a string", index))
            })?;
            if let Some(phrase) = Phrase::new(text) {
                phrases.push(phrase);
            }
        }

        Ok(Self { phrases, payload })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Dispatching,
    Completing,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Dispatching => "dispatching",
            RunState::Completing => "completing",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemResult {
    /// Dispatched and written to the audit ledger.
    Recorded(SynthesisJob),
    /// The engine call failed; nothing was written.
    DispatchFailed(String),
    /// Dispatched, but the ledger write failed.
    AuditFailed { job: SynthesisJob, reason: String },
    /// The item's task panicked before reporting.
    Aborted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub index: usize,
    pub phrase: Phrase,
    pub result: ItemResult,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub day: String,
    pub started_at: DateTime<Utc>,
    pub state: RunState,
    /// One entry per phrase, in batch order.
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn recorded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, ItemResult::Recorded(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.recorded()
    }
}
