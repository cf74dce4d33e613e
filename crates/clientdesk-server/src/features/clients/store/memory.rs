use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ClientStore;
use crate::db::StoreResult;
use crate::features::clients::types::{
    Client, ClientChanges, ClientListFilter, ClientMetrics, ClientSortField, NewClient, SortOrder,
};

/// Process-local client store
#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    clients: RwLock<HashMap<Uuid, Client>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Client, b: &Client, field: ClientSortField) -> Ordering {
    match field {
        ClientSortField::Name => a.name.cmp(&b.name),
        ClientSortField::Salary => a.salary.cmp(&b.salary),
        ClientSortField::CompanyValue => a.company_value.cmp(&b.company_value),
        ClientSortField::ViewCount => a.view_count.cmp(&b.view_count),
        ClientSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ClientSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
    .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn insert(&self, client: NewClient) -> StoreResult<Client> {
        let now = Utc::now();
        let stored = Client {
            id: Uuid::new_v4(),
            name: client.name,
            salary: client.salary,
            company_value: client.company_value,
            view_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.clients.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_active(&self, id: Uuid) -> StoreResult<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .get(&id)
            .filter(|c| c.deleted_at.is_none())
            .cloned())
    }

    async fn list(&self, filter: &ClientListFilter) -> StoreResult<(Vec<Client>, i64)> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let clients = self.clients.read().await;

        let mut matches: Vec<Client> = clients
            .values()
            .filter(|c| c.deleted_at.is_none())
            .filter(|c| {
                needle
                    .as_deref()
                    .is_none_or(|n| c.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let ordering = compare(a, b, filter.order_by);
            match filter.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: Uuid, changes: &ClientChanges) -> StoreResult<Option<Client>> {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.get_mut(&id).filter(|c| c.deleted_at.is_none()) else {
            return Ok(None);
        };

        changes.apply(client);
        client.updated_at = Utc::now();
        Ok(Some(client.clone()))
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<Option<Client>> {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.get_mut(&id).filter(|c| c.deleted_at.is_none()) else {
            return Ok(None);
        };

        client.view_count = client.view_count.saturating_add(1);
        Ok(Some(client.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.get_mut(&id).filter(|c| c.deleted_at.is_none()) else {
            return Ok(false);
        };

        let now = Utc::now();
        client.deleted_at = Some(now);
        client.updated_at = now;
        Ok(true)
    }

    async fn metrics(&self, day_start: DateTime<Utc>) -> StoreResult<ClientMetrics> {
        let clients = self.clients.read().await;
        let active: Vec<&Client> = clients.values().filter(|c| c.deleted_at.is_none()).collect();

        Ok(ClientMetrics {
            total_clients: active.len() as i64,
            clients_today: active.iter().filter(|c| c.created_at >= day_start).count() as i64,
            most_viewed_count: active
                .iter()
                .map(|c| i64::from(c.view_count))
                .max()
                .unwrap_or(0),
        })
    }
}
