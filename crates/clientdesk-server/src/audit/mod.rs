//! Audit trail
//!
//! Every client mutation, tracked read and login writes one immutable audit
//! record with before/after snapshots, the acting user and request
//! provenance. Audit records are never updated or deleted.
//!
//! Writes are explicit: each business operation calls a `log_*` helper on
//! [`AuditWriter`] after its primary write and wraps it in [`best_effort`],
//! so a failing audit store never changes the operation's outcome.
//!
//! # Example
//!
//! ```no_run
//! use clientdesk_server::audit::{best_effort, tables, AuditOrigin, AuditWriter};
//! use uuid::Uuid;
//!
//! # async fn example(writer: &AuditWriter, client_id: Uuid, actor: Uuid) {
//! let origin = AuditOrigin::new(Some(actor)).with_source_ip(Some("10.0.0.1".into()));
//! best_effort(writer.log_read(tables::CLIENTS, client_id, &origin)).await;
//! # }
//! ```

mod models;
pub mod queries;
mod redact;
mod routes;
mod store;
mod writer;

pub use models::{
    tables, AuditAction, AuditActor, AuditOrigin, AuditPage, AuditQuery, AuditRecord, NewAuditRecord,
    NewAuditRecordBuilder, DEFAULT_AUDIT_LIMIT, DEFAULT_AUDIT_PAGE, DEFAULT_USER_HISTORY_LIMIT,
    MAX_SOURCE_IP_LENGTH, MAX_TABLE_NAME_LENGTH, MAX_USER_AGENT_LENGTH,
};
pub use redact::{redact_snapshot, SENSITIVE_FIELDS};
pub use routes::audit_routes;
pub use store::{AuditStore, InMemoryAuditStore, PgAuditStore};
pub use writer::{best_effort, AuditError, AuditWriter};
