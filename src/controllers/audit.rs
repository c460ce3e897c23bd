use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::audit::{parse_audit_day, AuditRecord},
    error::{AppError, AppResult},
    infrastructure::repositories::AuditRepository,
};

/// Response for GET /audit/:day
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditListResponse {
    pub day: String,
    pub records: Vec<AuditRecord>,
}

pub struct AuditController {
    audit_repo: Arc<dyn AuditRepository>,
}

impl AuditController {
    pub fn new(audit_repo: Arc<dyn AuditRepository>) -> Self {
        Self { audit_repo }
    }

    /// GET /audit/:day - List the synthesis jobs recorded on a day
    pub async fn list_by_day(
        State(controller): State<Arc<AuditController>>,
        Path(day): Path<String>,
    ) -> AppResult<Json<AuditListResponse>> {
        let day = parse_audit_day(&day).ok_or_else(|| {
            AppError::BadRequest(format!("'{}' is not a date in YYYY-MM-DD format", day))
        })?;

        let records = controller
            .audit_repo
            .find_by_day(&day)
            .await
            .map_err(AppError::Internal)?;

        Ok(Json(AuditListResponse { day, records }))
    }
}
