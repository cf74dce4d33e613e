//! Client persistence
//!
//! Every method ignores soft-deleted rows: they are neither returned nor
//! modified.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::types::{Client, ClientChanges, ClientListFilter, ClientMetrics, NewClient};
use crate::db::StoreResult;

mod memory;
mod postgres;

pub use memory::InMemoryClientStore;
pub use postgres::PgClientStore;

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn insert(&self, client: NewClient) -> StoreResult<Client>;

    async fn find_active(&self, id: Uuid) -> StoreResult<Option<Client>>;

    /// One page of clients and the total number of matches
    async fn list(&self, filter: &ClientListFilter) -> StoreResult<(Vec<Client>, i64)>;

    /// Apply a partial update; `None` when no active client has this id
    async fn update(&self, id: Uuid, changes: &ClientChanges) -> StoreResult<Option<Client>>;

    async fn increment_views(&self, id: Uuid) -> StoreResult<Option<Client>>;

    /// Mark as deleted; `false` when no active client has this id
    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Counters, with "today" starting at `day_start`
    async fn metrics(&self, day_start: DateTime<Utc>) -> StoreResult<ClientMetrics>;
}
