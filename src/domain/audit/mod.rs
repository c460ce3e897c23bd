pub mod model;

pub use model::{audit_day, parse_audit_day, AuditRecord};
