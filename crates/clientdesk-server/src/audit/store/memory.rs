use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AuditStore;
use crate::audit::models::{AuditActor, AuditQuery, AuditRecord, NewAuditRecord};
use crate::db::{StoreError, StoreResult};
use crate::features::auth::UserStore;

/// Process-local audit store.
///
/// Records are kept in insertion order. [`set_available`](Self::set_available)
/// switches the store into a failing state to simulate an outage. Actors are
/// looked up in the attached user store on every read; without one, `actor`
/// stays empty.
#[derive(Default)]
pub struct InMemoryAuditStore {
    records: RwLock<Vec<AuditRecord>>,
    unavailable: AtomicBool,
    users: Option<Arc<dyn UserStore>>,
}

impl std::fmt::Debug for InMemoryAuditStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuditStore")
            .field("unavailable", &self.unavailable)
            .field("resolves_actors", &self.users.is_some())
            .finish_non_exhaustive()
    }
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that attaches actor profiles from `users`
    pub fn with_users(users: Arc<dyn UserStore>) -> Self {
        Self {
            users: Some(users),
            ..Self::default()
        }
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory audit store is offline"));
        }
        Ok(())
    }

    /// Matching records, newest first, later insertion first on equal timestamps
    async fn newest_first<F>(&self, predicate: F) -> Vec<AuditRecord>
    where
        F: Fn(&AuditRecord) -> bool,
    {
        let records = self.records.read().await;
        let mut matches: Vec<AuditRecord> =
            records.iter().rev().filter(|r| predicate(r)).cloned().collect();
        // stable sort keeps reverse insertion order among ties
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    async fn with_actor(&self, mut record: AuditRecord) -> StoreResult<AuditRecord> {
        record.actor = match (&self.users, record.actor_id) {
            (Some(users), Some(actor_id)) => {
                users.find_by_id(actor_id).await?.map(|user| AuditActor {
                    id: user.id,
                    email: user.email,
                    name: user.name,
                })
            },
            _ => None,
        };
        Ok(record)
    }

    async fn with_actors(&self, records: Vec<AuditRecord>) -> StoreResult<Vec<AuditRecord>> {
        let mut resolved = Vec::with_capacity(records.len());
        for record in records {
            resolved.push(self.with_actor(record).await?);
        }
        Ok(resolved)
    }
}

fn matches_query(record: &AuditRecord, query: &AuditQuery) -> bool {
    query.actor_id.is_none_or(|id| record.actor_id == Some(id))
        && query.table_name.as_deref().is_none_or(|t| record.table_name == t)
        && query.action.is_none_or(|a| record.action == a)
        && query.record_id.is_none_or(|id| record.record_id == Some(id))
        && query.start_date.is_none_or(|start| record.created_at >= start)
        && query.end_date.is_none_or(|end| record.created_at <= end)
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn insert(&self, entry: NewAuditRecord) -> StoreResult<AuditRecord> {
        self.ensure_available()?;

        let record = AuditRecord {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            actor: None,
            table_name: entry.table_name,
            action: entry.action,
            record_id: entry.record_id,
            previous_state: entry.previous_state,
            new_state: entry.new_state,
            source_ip: entry.source_ip,
            user_agent: entry.user_agent,
            created_at: Utc::now(),
        };

        self.records.write().await.push(record.clone());
        self.with_actor(record).await
    }

    async fn find_page(&self, query: &AuditQuery) -> StoreResult<(Vec<AuditRecord>, i64)> {
        self.ensure_available()?;

        let matches = self.newest_first(|r| matches_query(r, query)).await;
        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(0))
            .collect();

        Ok((self.with_actors(page).await?, total))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AuditRecord>> {
        self.ensure_available()?;
        let record = self.records.read().await.iter().find(|r| r.id == id).cloned();
        match record {
            Some(record) => Ok(Some(self.with_actor(record).await?)),
            None => Ok(None),
        }
    }

    async fn find_record_history(
        &self,
        table_name: &str,
        record_id: Uuid,
    ) -> StoreResult<Vec<AuditRecord>> {
        self.ensure_available()?;
        let records = self
            .newest_first(|r| r.table_name == table_name && r.record_id == Some(record_id))
            .await;
        self.with_actors(records).await
    }

    async fn find_by_actor(&self, actor_id: Uuid, limit: i64) -> StoreResult<Vec<AuditRecord>> {
        self.ensure_available()?;
        let mut records = self.newest_first(|r| r.actor_id == Some(actor_id)).await;
        records.truncate(usize::try_from(limit).unwrap_or(0));
        self.with_actors(records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::models::AuditAction;

    fn entry(table: &str, action: AuditAction, record_id: Option<Uuid>) -> NewAuditRecord {
        NewAuditRecord::builder()
            .table_name(table)
            .action(action)
            .record_id(record_id)
            .try_build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_history_is_newest_first_on_equal_timestamps() {
        let store = InMemoryAuditStore::new();
        let id = Uuid::new_v4();

        for action in [AuditAction::Create, AuditAction::Update, AuditAction::Delete] {
            store.insert(entry("clients", action, Some(id))).await.unwrap();
        }

        let history = store.find_record_history("clients", id).await.unwrap();
        let actions: Vec<_> = history.iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![AuditAction::Delete, AuditAction::Update, AuditAction::Create]);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_reads_and_writes() {
        let store = InMemoryAuditStore::new();
        store.set_available(false);

        let err = store.insert(entry("clients", AuditAction::Create, None)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(store.find_page(&AuditQuery::default()).await.is_err());

        store.set_available(true);
        assert!(store.insert(entry("clients", AuditAction::Create, None)).await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_page_filters_are_conjunctive() {
        let store = InMemoryAuditStore::new();
        let id = Uuid::new_v4();
        store.insert(entry("clients", AuditAction::Create, Some(id))).await.unwrap();
        store.insert(entry("clients", AuditAction::Update, Some(id))).await.unwrap();
        store.insert(entry("users", AuditAction::Update, None)).await.unwrap();

        let query = AuditQuery {
            table_name: Some("clients".into()),
            action: Some(AuditAction::Update),
            ..Default::default()
        };
        let (records, total) = store.find_page(&query).await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(records[0].record_id, Some(id));
    }

    #[tokio::test]
    async fn test_reads_attach_actor_profile() {
        use crate::features::auth::{InMemoryUserStore, NewUser};

        let users = Arc::new(InMemoryUserStore::new());
        let user = users
            .upsert(NewUser {
                email: "ops@example.com".into(),
                name: "Ops".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        let store = InMemoryAuditStore::with_users(users);

        let known = NewAuditRecord {
            actor_id: Some(user.id),
            ..entry("clients", AuditAction::Create, None)
        };
        let unknown = NewAuditRecord {
            actor_id: Some(Uuid::new_v4()),
            ..entry("clients", AuditAction::Create, None)
        };
        let inserted = store.insert(known).await.unwrap();
        store.insert(unknown).await.unwrap();

        let actor = inserted.actor.unwrap();
        assert_eq!(actor.id, user.id);
        assert_eq!(actor.email, "ops@example.com");
        assert_eq!(actor.name, "Ops");

        let (records, _) = store.find_page(&AuditQuery::default()).await.unwrap();
        assert!(records[0].actor.is_none());
        assert_eq!(records[1].actor.as_ref().map(|a| a.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let store = InMemoryAuditStore::new();
        store.insert(entry("clients", AuditAction::Create, None)).await.unwrap();

        let query = AuditQuery {
            page: 3,
            limit: i64::MAX,
            ..Default::default()
        };
        let (records, total) = store.find_page(&query).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(total, 1);
    }
}
