pub mod audit_repository;
pub mod export_repository;
pub mod notification_repository;
pub mod output_store_repository;
pub mod polly_synthesis_repository;
pub mod sns_notification_repository;
pub mod synthesis_repository;

pub use audit_repository::{AuditRepository, PgAuditRepository};
pub use export_repository::{PgExportRepository, SharedResourceCatalog};
pub use notification_repository::{NotificationRepository, TopicProvisioner};
pub use output_store_repository::S3OutputStoreRepository;
pub use polly_synthesis_repository::PollySynthesisRepository;
pub use sns_notification_repository::SnsNotificationRepository;
pub use synthesis_repository::{SynthesisRepository, SynthesisTask};
