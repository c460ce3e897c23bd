use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use genspeech_backend::cli::{Cli, Command};
use genspeech_backend::controllers::{audit::AuditController, batch::BatchController};
use genspeech_backend::domain::batch::BatchOrchestrator;
use genspeech_backend::domain::environment::{
    EnvironmentRegistry, LifecycleService, LifecycleServiceApi, ProvisioningService,
    ProvisioningServiceApi, StatefulResource,
};
use genspeech_backend::domain::synthesis::{StoreRef, SynthesisDispatcher};
use genspeech_backend::infrastructure::config::{Config, LogFormat};
use genspeech_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use genspeech_backend::infrastructure::http::{create_router, start_http_server};
use genspeech_backend::infrastructure::repositories::{
    PgAuditRepository, PgExportRepository, PollySynthesisRepository, S3OutputStoreRepository,
    SnsNotificationRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?.with_branch(cli.branch.clone());

    // Initialize logging
    init_logging(&config);

    // Resolve the environment before anything else: no branch, no deployment
    let environment = EnvironmentRegistry::resolve(&config.branch, &config.trunk_branch)?;
    tracing::info!(
        environment = %environment.id,
        is_trunk = environment.is_trunk,
        removal_policy = %environment.removal_policy(),
        stateful_stack = %environment.stateful_stack_name(),
        stateless_stack = %environment.stateless_stack_name(),
        tags = ?environment.tags(),
        "Starting GenSpeech Backend ({:?})",
        cli.command()
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // Create AWS clients
    tracing::info!("Initializing AWS clients with region: {}", config.aws_region);

    let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
    let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
    tracing::info!(
        has_access_key_id = has_access_key,
        has_secret_access_key = has_secret_key,
        "AWS credentials environment check"
    );

    if !has_access_key || !has_secret_key {
        tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
    }

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    tracing::info!(
        region = ?aws_config.region(),
        "AWS configuration loaded"
    );

    let pool = Arc::new(pool);
    let config = Arc::new(config);
    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    let sns_client = Arc::new(aws_sdk_sns::Client::new(&aws_config));
    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let audit_repo = Arc::new(PgAuditRepository::new(pool.clone(), environment.id.clone()));
    let export_repo = Arc::new(PgExportRepository::new(pool.clone()));
    let notification_repo = Arc::new(SnsNotificationRepository::new(sns_client));
    let synthesis_repo = Arc::new(PollySynthesisRepository::new(polly_client));
    let output_store_repo = Arc::new(S3OutputStoreRepository::new(
        s3_client,
        config.output_bucket.clone(),
    ));

    match cli.command() {
        Command::Teardown => {
            let resources: Vec<Arc<dyn StatefulResource>> = vec![audit_repo, output_store_repo];
            let lifecycle_service = LifecycleService::new(resources);
            let report = lifecycle_service.teardown(&environment).await?;
            tracing::info!(
                environment = %report.environment,
                policy = %report.policy,
                retained = report.retained.len(),
                purged = report.purged.len(),
                "Teardown complete"
            );
            return Ok(());
        }
        Command::Bootstrap | Command::Serve => {}
    }

    // 2. Resolve the shared notification sink
    let provisioning_service = ProvisioningService::new(
        export_repo,
        notification_repo.clone(),
        config.notification_topic_name.clone(),
        config.notification_export_name.clone(),
    );
    let sink = provisioning_service
        .ensure_notification_sink(&environment)
        .await?;
    tracing::info!(
        topic_arn = %sink.arn,
        ownership = ?sink.ownership,
        "Notification sink ready"
    );

    if cli.command() == Command::Bootstrap {
        return Ok(());
    }

    // 3. Instantiate services
    tracing::info!(
        state_machine = %environment.resource_name("PhraseSynthesiser"),
        "Instantiating services..."
    );
    let dispatcher = Arc::new(SynthesisDispatcher::new(
        synthesis_repo,
        config.voice_id.clone(),
    ));
    let orchestrator = Arc::new(BatchOrchestrator::new(
        dispatcher,
        audit_repo.clone(),
        notification_repo,
        sink,
        StoreRef::for_environment(config.output_bucket.clone(), &environment),
        environment.clone(),
    ));

    // 4. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let batch_controller = Arc::new(BatchController::new(orchestrator));
    let audit_controller = Arc::new(AuditController::new(audit_repo));

    let app = create_router(
        pool,
        Arc::new(environment),
        batch_controller,
        audit_controller,
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "genspeech_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "genspeech_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
