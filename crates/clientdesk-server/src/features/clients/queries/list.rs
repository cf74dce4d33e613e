//! List clients with pagination, search and ordering

use serde::Deserialize;

use crate::db::StoreError;
use crate::features::clients::store::ClientStore;
use crate::features::clients::types::{Client, ClientListFilter, ClientSortField, SortOrder};
use crate::features::shared::{Page, PaginationParams};

/// Query string of `GET /api/clients`
///
/// `search` is a case-insensitive substring match on the name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClientsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    #[serde(default)]
    pub order_by: ClientSortField,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, thiserror::Error)]
pub enum ListClientsError {
    #[error("{0}")]
    InvalidPagination(&'static str),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ListClientsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn ClientStore,
    query: ListClientsQuery,
) -> Result<Page<Client>, ListClientsError> {
    let pagination = query.pagination();
    pagination.validate().map_err(ListClientsError::InvalidPagination)?;

    let filter = ClientListFilter {
        search: query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        order_by: query.order_by,
        order: query.order,
        limit: pagination.limit(),
        offset: pagination.offset(),
    };

    let (clients, total) = store.list(&filter).await?;

    Ok(Page::new(clients, total, &pagination))
}
