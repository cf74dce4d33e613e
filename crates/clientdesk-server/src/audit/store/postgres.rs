use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::AuditStore;
use crate::audit::models::{AuditAction, AuditActor, AuditQuery, AuditRecord, NewAuditRecord};
use crate::db::StoreResult;

// Audit columns plus the actor's public profile; `a` is the audit row, `u` the joined user.
const AUDIT_FIELDS: &str = "a.id, a.actor_id, a.table_name, a.action, a.record_id, \
                            a.previous_state, a.new_state, a.source_ip, a.user_agent, \
                            a.created_at, u.email AS actor_email, u.name AS actor_name";

const AUDIT_FROM: &str = "FROM audits a LEFT JOIN users u ON u.id = a.actor_id";

// Unset filters are bound as NULL and short-circuit their predicate.
const AUDIT_FILTERS: &str = r#"
    WHERE ($1::uuid IS NULL OR a.actor_id = $1)
      AND ($2::text IS NULL OR a.table_name = $2)
      AND ($3::audit_action IS NULL OR a.action = $3)
      AND ($4::uuid IS NULL OR a.record_id = $4)
      AND ($5::timestamptz IS NULL OR a.created_at >= $5)
      AND ($6::timestamptz IS NULL OR a.created_at <= $6)
"#;

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: Uuid,
    actor_id: Option<Uuid>,
    table_name: String,
    action: AuditAction,
    record_id: Option<Uuid>,
    previous_state: Option<JsonValue>,
    new_state: Option<JsonValue>,
    source_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    actor_email: Option<String>,
    actor_name: Option<String>,
}

impl From<AuditRow> for AuditRecord {
    fn from(row: AuditRow) -> Self {
        let actor = match (row.actor_id, row.actor_email, row.actor_name) {
            (Some(id), Some(email), Some(name)) => Some(AuditActor { id, email, name }),
            _ => None,
        };

        Self {
            id: row.id,
            actor_id: row.actor_id,
            actor,
            table_name: row.table_name,
            action: row.action,
            record_id: row.record_id,
            previous_state: row.previous_state,
            new_state: row.new_state,
            source_ip: row.source_ip,
            user_agent: row.user_agent,
            created_at: row.created_at,
        }
    }
}

/// Audit store backed by the `audits` table
#[derive(Debug, Clone)]
pub struct PgAuditStore {
    pool: PgPool,
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn insert(&self, entry: NewAuditRecord) -> StoreResult<AuditRecord> {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO audits (
                    id, actor_id, table_name, action, record_id,
                    previous_state, new_state, source_ip, user_agent
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
            )
            SELECT {AUDIT_FIELDS} FROM a LEFT JOIN users u ON u.id = a.actor_id
            "#
        );

        let record: AuditRecord = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(entry.actor_id)
            .bind(&entry.table_name)
            .bind(entry.action)
            .bind(entry.record_id)
            .bind(&entry.previous_state)
            .bind(&entry.new_state)
            .bind(&entry.source_ip)
            .bind(&entry.user_agent)
            .fetch_one(&self.pool)
            .await?
            .into();

        debug!(
            audit_id = %record.id,
            action = %record.action,
            table_name = %record.table_name,
            "Created audit record"
        );

        Ok(record)
    }

    async fn find_page(&self, query: &AuditQuery) -> StoreResult<(Vec<AuditRecord>, i64)> {
        let count_sql = format!("SELECT COUNT(*) FROM audits a {AUDIT_FILTERS}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(query.actor_id)
            .bind(&query.table_name)
            .bind(query.action)
            .bind(query.record_id)
            .bind(query.start_date)
            .bind(query.end_date)
            .fetch_one(&self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {AUDIT_FIELDS} {AUDIT_FROM} {AUDIT_FILTERS} \
             ORDER BY a.created_at DESC, a.seq DESC LIMIT $7 OFFSET $8"
        );
        let records: Vec<AuditRecord> = sqlx::query_as::<_, AuditRow>(&page_sql)
            .bind(query.actor_id)
            .bind(&query.table_name)
            .bind(query.action)
            .bind(query.record_id)
            .bind(query.start_date)
            .bind(query.end_date)
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AuditRecord::from)
            .collect();

        debug!(count = records.len(), total, "Queried audit records");

        Ok((records, total))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AuditRecord>> {
        let sql = format!("SELECT {AUDIT_FIELDS} {AUDIT_FROM} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(AuditRecord::from))
    }

    async fn find_record_history(
        &self,
        table_name: &str,
        record_id: Uuid,
    ) -> StoreResult<Vec<AuditRecord>> {
        let sql = format!(
            "SELECT {AUDIT_FIELDS} {AUDIT_FROM} \
             WHERE a.table_name = $1 AND a.record_id = $2 \
             ORDER BY a.created_at DESC, a.seq DESC"
        );
        let records: Vec<AuditRecord> = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(table_name)
            .bind(record_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AuditRecord::from)
            .collect();

        debug!(
            table_name,
            record_id = %record_id,
            count = records.len(),
            "Retrieved record history"
        );

        Ok(records)
    }

    async fn find_by_actor(&self, actor_id: Uuid, limit: i64) -> StoreResult<Vec<AuditRecord>> {
        let sql = format!(
            "SELECT {AUDIT_FIELDS} {AUDIT_FROM} WHERE a.actor_id = $1 \
             ORDER BY a.created_at DESC, a.seq DESC LIMIT $2"
        );
        let records: Vec<AuditRecord> = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(actor_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AuditRecord::from)
            .collect();

        debug!(actor_id = %actor_id, count = records.len(), "Retrieved actor audit records");

        Ok(records)
    }
}
