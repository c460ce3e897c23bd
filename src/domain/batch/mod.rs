pub mod error;
pub mod model;
pub mod service;

pub use error::BatchServiceError;
pub use model::{BatchReport, BatchRequest, ItemOutcome, ItemResult, RunState};
pub use service::{BatchOrchestrator, BatchOrchestratorApi, MAX_IN_FLIGHT};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for POST /synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRunResponse {
    pub run_id: Uuid,
    pub day: String,
    pub phrases: usize,
    pub state: RunState,
}

impl From<&BatchReport> for BatchRunResponse {
    fn from(report: &BatchReport) -> Self {
        Self {
            run_id: report.run_id,
            day: report.day.clone(),
            phrases: report.outcomes.len(),
            state: report.state,
        }
    }
}
