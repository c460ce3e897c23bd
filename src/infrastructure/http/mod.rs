pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{audit::AuditController, batch::BatchController, health};
use crate::domain::environment::Environment;
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn create_router(
    pool: Arc<DbPool>,
    environment: Arc<Environment>,
    batch_controller: Arc<BatchController>,
    audit_controller: Arc<AuditController>,
) -> Router {
    // Front door: one batch run per request
    let batch_routes = Router::new()
        .route("/synthesize", post(BatchController::synthesize))
        .with_state(batch_controller);

    let audit_routes = Router::new()
        .route("/audit/:day", get(AuditController::list_by_day))
        .with_state(audit_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state((pool, environment))
        .merge(batch_routes)
        .merge(audit_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
