//! Read side of the audit trail
//!
//! Storage failures propagate as [`AuditError::Storage`]; nothing here falls
//! back to an empty result.

use uuid::Uuid;

use super::models::{AuditPage, AuditQuery, AuditRecord};
use super::store::AuditStore;
use super::writer::AuditError;

/// Paginated, filtered listing, newest first
pub async fn query_audits(store: &dyn AuditStore, query: AuditQuery) -> Result<AuditPage, AuditError> {
    if query.page < 1 {
        return Err(AuditError::Validation("page must be at least 1".to_string()));
    }
    if query.limit < 1 {
        return Err(AuditError::Validation("limit must be at least 1".to_string()));
    }

    let (data, total) = store.find_page(&query).await?;

    Ok(AuditPage {
        data,
        total,
        page: query.page,
        limit: query.limit,
    })
}

pub async fn find_audit(store: &dyn AuditStore, id: Uuid) -> Result<AuditRecord, AuditError> {
    store.find_by_id(id).await?.ok_or(AuditError::NotFound(id))
}

/// Full history of one business record, newest first
pub async fn find_record_history(
    store: &dyn AuditStore,
    table_name: &str,
    record_id: Uuid,
) -> Result<Vec<AuditRecord>, AuditError> {
    Ok(store.find_record_history(table_name, record_id).await?)
}

/// An actor's most recent actions
pub async fn find_by_user(
    store: &dyn AuditStore,
    actor_id: Uuid,
    limit: i64,
) -> Result<Vec<AuditRecord>, AuditError> {
    if limit < 1 {
        return Err(AuditError::Validation("limit must be at least 1".to_string()));
    }
    Ok(store.find_by_actor(actor_id, limit).await?)
}
