use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::ClientStore;
use crate::db::StoreResult;
use crate::features::clients::types::{
    Client, ClientChanges, ClientListFilter, ClientMetrics, NewClient,
};

const CLIENT_COLUMNS: &str =
    "id, name, salary, company_value, view_count, created_at, updated_at, deleted_at";

#[derive(Debug, Clone)]
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so the search term matches literally
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn insert(&self, client: NewClient) -> StoreResult<Client> {
        let sql = format!(
            "INSERT INTO clients (id, name, salary, company_value) \
             VALUES ($1, $2, $3, $4) RETURNING {CLIENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(Uuid::new_v4())
            .bind(&client.name)
            .bind(client.salary)
            .bind(client.company_value)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_active(&self, id: Uuid) -> StoreResult<Option<Client>> {
        let sql =
            format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1 AND deleted_at IS NULL");
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list(&self, filter: &ClientListFilter) -> StoreResult<(Vec<Client>, i64)> {
        let pattern = filter.search.as_deref().map(like_pattern);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM clients
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        // Column and direction come from closed enums, never from user text
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients \
             WHERE deleted_at IS NULL AND ($1::text IS NULL OR name ILIKE $1) \
             ORDER BY {column} {direction}, id {direction} \
             LIMIT $2 OFFSET $3",
            column = filter.order_by.column(),
            direction = filter.order.as_sql(),
        );
        let clients = sqlx::query_as::<_, Client>(&sql)
            .bind(&pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((clients, total))
    }

    async fn update(&self, id: Uuid, changes: &ClientChanges) -> StoreResult<Option<Client>> {
        let sql = format!(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                salary = COALESCE($3, salary),
                company_value = COALESCE($4, company_value),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {CLIENT_COLUMNS}
            "#
        );
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.salary)
            .bind(changes.company_value)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<Option<Client>> {
        let sql = format!(
            "UPDATE clients SET view_count = view_count + 1 \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {CLIENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE clients SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn metrics(&self, day_start: DateTime<Utc>) -> StoreResult<ClientMetrics> {
        let (total_clients, clients_today, most_viewed_count) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE created_at >= $1),
                       COALESCE(MAX(view_count), 0)::bigint
                FROM clients
                WHERE deleted_at IS NULL
                "#,
            )
            .bind(day_start)
            .fetch_one(&self.pool)
            .await?;

        Ok(ClientMetrics {
            total_clients,
            clients_today,
            most_viewed_count,
        })
    }
}
