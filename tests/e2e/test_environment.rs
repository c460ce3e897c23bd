use crate::e2e::helpers;

use genspeech_backend::domain::audit::AuditRecord;
use genspeech_backend::domain::environment::{
    EnvironmentError, EnvironmentRegistry, LifecycleService, LifecycleServiceApi,
    ProvisioningService, ProvisioningServiceApi, RemovalPolicy, SinkOwnership, StatefulResource,
};
use genspeech_backend::infrastructure::repositories::{
    AuditRepository, PgAuditRepository, PgExportRepository, SharedResourceCatalog,
};
use helpers::db::TestDatabase;
use helpers::fakes::FakeNotificationSink;
use pretty_assertions::assert_eq;
use std::sync::Arc;

const TOPIC_NAME: &str = "CompletedNotification";
const EXPORT_NAME: &str = "NotificationTopicArn";

struct Provisioning {
    catalog: Arc<PgExportRepository>,
    sns: Arc<FakeNotificationSink>,
    service: ProvisioningService,
}

async fn provisioning(database: &TestDatabase) -> Provisioning {
    let catalog = Arc::new(PgExportRepository::new(Arc::new(database.pool.clone())));
    let sns = Arc::new(FakeNotificationSink::default());
    let service = ProvisioningService::new(
        catalog.clone(),
        sns.clone(),
        TOPIC_NAME.to_string(),
        EXPORT_NAME.to_string(),
    );
    Provisioning {
        catalog,
        sns,
        service,
    }
}

#[tokio::test]
async fn it_should_create_and_export_sink_for_trunk() {
    let database = TestDatabase::create().await.unwrap();
    let p = provisioning(&database).await;
    let trunk = EnvironmentRegistry::resolve("main", "main").unwrap();

    let sink = p.service.ensure_notification_sink(&trunk).await.unwrap();

    assert_eq!(sink.ownership, SinkOwnership::Owned);
    assert_eq!(sink.arn, "arn:aws:sns:eu-west-1:123456789012:CompletedNotification");
    assert_eq!(
        p.catalog.lookup(EXPORT_NAME).await.unwrap(),
        Some(sink.arn.clone())
    );

    // Running bootstrap again reuses the same sink
    let again = p.service.ensure_notification_sink(&trunk).await.unwrap();
    assert_eq!(again.arn, sink.arn);
    assert_eq!(p.sns.topics.lock().len(), 1);
}

#[tokio::test]
async fn it_should_import_trunk_sink_for_feature_branch() {
    let database = TestDatabase::create().await.unwrap();
    let p = provisioning(&database).await;
    let trunk = EnvironmentRegistry::resolve("main", "main").unwrap();
    let feature = EnvironmentRegistry::resolve("feature-x", "main").unwrap();

    let owned = p.service.ensure_notification_sink(&trunk).await.unwrap();
    let imported = p.service.ensure_notification_sink(&feature).await.unwrap();

    assert_eq!(imported.arn, owned.arn);
    assert_eq!(imported.ownership, SinkOwnership::Imported);
    assert_eq!(p.sns.topics.lock().len(), 1);
}

#[tokio::test]
async fn it_should_fail_feature_branch_before_trunk_exists() {
    let database = TestDatabase::create().await.unwrap();
    let p = provisioning(&database).await;
    let feature = EnvironmentRegistry::resolve("feature-x", "main").unwrap();

    let err = p.service.ensure_notification_sink(&feature).await.unwrap_err();

    assert!(matches!(err, EnvironmentError::SharedResourceMissing(_)));
    assert!(p.sns.topics.lock().is_empty());
}

fn record(task_id: &str) -> AuditRecord {
    AuditRecord {
        day: "2024-03-09".to_string(),
        task_id: task_id.to_string(),
        output_uri: format!("https://s3.eu-west-1.amazonaws.com/bucket/{}.mp3", task_id),
    }
}

#[tokio::test]
async fn it_should_purge_feature_ledger_on_teardown() {
    let database = TestDatabase::create().await.unwrap();
    let pool = Arc::new(database.pool.clone());
    let feature = EnvironmentRegistry::resolve("feature-x", "main").unwrap();
    let ledger = Arc::new(PgAuditRepository::new(pool, feature.id.clone()));
    ledger.put(&record("task-1")).await.unwrap();
    ledger.put(&record("task-2")).await.unwrap();

    let resources: Vec<Arc<dyn StatefulResource>> = vec![ledger.clone()];
    let report = LifecycleService::new(resources)
        .teardown(&feature)
        .await
        .unwrap();

    assert_eq!(report.policy, RemovalPolicy::Destroy);
    assert_eq!(report.purged.len(), 1);
    assert_eq!(report.purged[0].name, "audit-ledger");
    assert_eq!(report.purged[0].items, 2);
    assert!(ledger.find_by_day("2024-03-09").await.unwrap().is_empty());
}

#[tokio::test]
async fn it_should_retain_trunk_ledger_on_teardown() {
    let database = TestDatabase::create().await.unwrap();
    let pool = Arc::new(database.pool.clone());
    let trunk = EnvironmentRegistry::resolve("main", "main").unwrap();
    let ledger = Arc::new(PgAuditRepository::new(pool, trunk.id.clone()));
    ledger.put(&record("task-1")).await.unwrap();

    let resources: Vec<Arc<dyn StatefulResource>> = vec![ledger.clone()];
    let report = LifecycleService::new(resources)
        .teardown(&trunk)
        .await
        .unwrap();

    assert_eq!(report.policy, RemovalPolicy::Retain);
    assert_eq!(report.retained, vec!["audit-ledger".to_string()]);
    assert!(report.purged.is_empty());
    assert_eq!(ledger.find_by_day("2024-03-09").await.unwrap().len(), 1);
}
