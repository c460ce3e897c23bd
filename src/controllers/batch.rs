use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::batch::{BatchOrchestratorApi, BatchRequest, BatchRunResponse},
    error::AppResult,
};

pub struct BatchController {
    orchestrator: Arc<dyn BatchOrchestratorApi>,
}

impl BatchController {
    pub fn new(orchestrator: Arc<dyn BatchOrchestratorApi>) -> Self {
        Self { orchestrator }
    }

    /// POST /synthesize - Run a batch of phrases through synthesis
    ///
    /// Responds once the whole batch has resolved and the completion
    /// notification has been published. Individual phrase failures are not
    /// reported here; the audit ledger is the source of truth.
    pub async fn synthesize(
        State(controller): State<Arc<BatchController>>,
        Json(payload): Json<Value>,
    ) -> AppResult<Json<BatchRunResponse>> {
        let request = BatchRequest::from_payload(payload)?;

        tracing::info!(phrase_count = request.phrases.len(), "Batch synthesis request");

        let report = controller.orchestrator.run(request).await?;

        Ok(Json(BatchRunResponse::from(&report)))
    }
}
