//! Audit persistence
//!
//! [`AuditStore`] is the seam between the writer/query surface and the
//! backing storage. Every listing is ordered newest first, ties broken by
//! later insertion first.

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{AuditQuery, AuditRecord, NewAuditRecord};
use crate::db::StoreResult;

mod memory;
mod postgres;

pub use memory::InMemoryAuditStore;
pub use postgres::PgAuditStore;

#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist one record; snapshots are stored exactly as given
    async fn insert(&self, entry: NewAuditRecord) -> StoreResult<AuditRecord>;

    /// One page of matching records and the total number of matches
    async fn find_page(&self, query: &AuditQuery) -> StoreResult<(Vec<AuditRecord>, i64)>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AuditRecord>>;

    /// Every record for one business record, unpaginated
    async fn find_record_history(
        &self,
        table_name: &str,
        record_id: Uuid,
    ) -> StoreResult<Vec<AuditRecord>>;

    async fn find_by_actor(&self, actor_id: Uuid, limit: i64) -> StoreResult<Vec<AuditRecord>>;
}
