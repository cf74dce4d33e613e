//! Audit log writer
//!
//! Business operations call one of the `log_*` helpers right after their
//! primary write and wrap it in [`best_effort`], so an audit failure is
//! logged and never reaches the caller.

use serde_json::Value as JsonValue;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::models::{
    tables, AuditAction, AuditOrigin, AuditRecord, NewAuditRecord, MAX_SOURCE_IP_LENGTH,
    MAX_TABLE_NAME_LENGTH, MAX_USER_AGENT_LENGTH,
};
use super::redact::redact_snapshot;
use super::store::AuditStore;
use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{0}")]
    Validation(String),

    #[error("Audit record '{0}' not found")]
    NotFound(Uuid),

    #[error("Audit storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Writes audit records through an [`AuditStore`]
#[derive(Clone)]
pub struct AuditWriter {
    store: Arc<dyn AuditStore>,
}

impl AuditWriter {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Redact, validate and persist one record.
    #[tracing::instrument(skip(self, entry), fields(table_name = %entry.table_name, action = %entry.action))]
    pub async fn record(&self, mut entry: NewAuditRecord) -> Result<AuditRecord, AuditError> {
        if entry.table_name.chars().count() > MAX_TABLE_NAME_LENGTH {
            return Err(AuditError::Validation(format!(
                "Table name cannot exceed {} characters",
                MAX_TABLE_NAME_LENGTH
            )));
        }

        entry.previous_state = entry.previous_state.map(redact_snapshot);
        entry.new_state = entry.new_state.map(redact_snapshot);
        entry.source_ip = entry.source_ip.map(|ip| truncate(ip, MAX_SOURCE_IP_LENGTH));
        entry.user_agent = entry.user_agent.map(|ua| truncate(ua, MAX_USER_AGENT_LENGTH));

        Ok(self.store.insert(entry).await?)
    }

    /// A successful login. The record id is the actor's own id.
    pub async fn log_login(&self, origin: &AuditOrigin) -> Result<AuditRecord, AuditError> {
        self.record(build(
            NewAuditRecord::builder()
                .table_name(tables::USERS)
                .action(AuditAction::Login)
                .record_id(origin.actor_id)
                .origin(origin),
        )?)
        .await
    }

    pub async fn log_create(
        &self,
        table_name: &str,
        record_id: Uuid,
        new_state: JsonValue,
        origin: &AuditOrigin,
    ) -> Result<AuditRecord, AuditError> {
        self.record(build(
            NewAuditRecord::builder()
                .table_name(table_name)
                .action(AuditAction::Create)
                .record_id(Some(record_id))
                .new_state(new_state)
                .origin(origin),
        )?)
        .await
    }

    pub async fn log_read(
        &self,
        table_name: &str,
        record_id: Uuid,
        origin: &AuditOrigin,
    ) -> Result<AuditRecord, AuditError> {
        self.record(build(
            NewAuditRecord::builder()
                .table_name(table_name)
                .action(AuditAction::Read)
                .record_id(Some(record_id))
                .origin(origin),
        )?)
        .await
    }

    pub async fn log_update(
        &self,
        table_name: &str,
        record_id: Uuid,
        previous_state: JsonValue,
        new_state: JsonValue,
        origin: &AuditOrigin,
    ) -> Result<AuditRecord, AuditError> {
        self.record(build(
            NewAuditRecord::builder()
                .table_name(table_name)
                .action(AuditAction::Update)
                .record_id(Some(record_id))
                .previous_state(previous_state)
                .new_state(new_state)
                .origin(origin),
        )?)
        .await
    }

    pub async fn log_delete(
        &self,
        table_name: &str,
        record_id: Uuid,
        previous_state: JsonValue,
        origin: &AuditOrigin,
    ) -> Result<AuditRecord, AuditError> {
        self.record(build(
            NewAuditRecord::builder()
                .table_name(table_name)
                .action(AuditAction::Delete)
                .record_id(Some(record_id))
                .previous_state(previous_state)
                .origin(origin),
        )?)
        .await
    }
}

/// Await an audit write and swallow its failure after logging it.
pub async fn best_effort<F>(write: F) -> Option<AuditRecord>
where
    F: Future<Output = Result<AuditRecord, AuditError>>,
{
    match write.await {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!(error = %e, "Failed to write audit record");
            None
        },
    }
}

fn build(builder: super::models::NewAuditRecordBuilder) -> Result<NewAuditRecord, AuditError> {
    builder
        .try_build()
        .map_err(|e| AuditError::Validation(e.to_string()))
}

fn truncate(mut value: String, max_chars: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
    value
}
