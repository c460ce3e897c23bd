use anyhow::Result;
use genspeech_backend::{
    controllers::{audit::AuditController, batch::BatchController},
    domain::{
        batch::BatchOrchestrator,
        environment::{Environment, EnvironmentRegistry, SinkOwnership, SinkRef},
        synthesis::{StoreRef, SynthesisDispatcher},
    },
    infrastructure::{http::create_router, repositories::PgAuditRepository},
};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;

use api_client::TestClient;
use db::TestDatabase;
use fakes::{FakeNotificationSink, FakeSynthesisEngine};

pub const OUTPUT_BUCKET: &str = "generated-mp3";
pub const TOPIC_ARN: &str = "arn:aws:sns:eu-west-1:123456789012:CompletedNotification";

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub pool: PgPool,
    #[allow(dead_code)]
    pub environment: Environment,
    pub engine: Arc<FakeSynthesisEngine>,
    pub sink: Arc<FakeNotificationSink>,
    #[allow(dead_code)]
    pub ledger: Arc<PgAuditRepository>,
}

impl TestContext {
    /// Start an app for the `feature-x` environment whose notification sink
    /// behaves like `sink`.
    pub async fn start(sink: FakeNotificationSink) -> Result<Self> {
        let database = TestDatabase::create().await?;
        let environment = EnvironmentRegistry::resolve("feature-x", "main")?;

        let pool = Arc::new(database.pool.clone());
        let engine = Arc::new(FakeSynthesisEngine::default());
        let sink = Arc::new(sink);
        let ledger = Arc::new(PgAuditRepository::new(pool.clone(), environment.id.clone()));

        let dispatcher = Arc::new(SynthesisDispatcher::new(engine.clone(), "Joey".to_string()));
        let orchestrator = Arc::new(BatchOrchestrator::new(
            dispatcher,
            ledger.clone(),
            sink.clone(),
            SinkRef {
                arn: TOPIC_ARN.to_string(),
                ownership: SinkOwnership::Imported,
            },
            StoreRef::for_environment(OUTPUT_BUCKET, &environment),
            environment.clone(),
        ));

        let app = create_router(
            pool,
            Arc::new(environment.clone()),
            Arc::new(BatchController::new(orchestrator)),
            Arc::new(AuditController::new(ledger.clone())),
        );

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            client: TestClient::new(&base_url),
            pool: database.pool,
            environment,
            engine,
            sink,
            ledger,
        })
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::start(FakeNotificationSink::default())
                .await
                .expect("Failed to start test app")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Each test owns a throwaway database; nothing to clean
        }
    }
}
