use crate::domain::synthesis::SynthesisJob;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One completed synthesis dispatch, keyed by `(day, task_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub day: String,
    pub task_id: String,
    pub output_uri: String,
}

impl AuditRecord {
    pub fn from_job(day: &str, job: &SynthesisJob) -> Self {
        Self {
            day: day.to_string(),
            task_id: job.job_id.clone(),
            output_uri: job.output_uri.clone(),
        }
    }
}

/// Calendar day (UTC, `YYYY-MM-DD`) of a run's start time.
pub fn audit_day(started_at: DateTime<Utc>) -> String {
    started_at.date_naive().format("%Y-%m-%d").to_string()
}

/// Validate an ISO date used to query the ledger.
pub fn parse_audit_day(day: &str) -> Option<String> {
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
