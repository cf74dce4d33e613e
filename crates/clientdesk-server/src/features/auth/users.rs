//! User accounts and their storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::StoreResult;

/// bcrypt work factor for stored password hashes
pub const PASSWORD_HASH_COST: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Insert, or replace name and hash of the user with the same email
    async fn upsert(&self, user: NewUser) -> StoreResult<User>;
}

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn upsert(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
                SET name = EXCLUDED.name,
                    password_hash = EXCLUDED.password_hash,
                    updated_at = NOW()
            RETURNING {USER_COLUMNS}
            "#
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?)
    }
}

/// Process-local user store keyed by email
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.values().find(|u| u.id == id).cloned())
    }

    async fn upsert(&self, user: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        let mut users = self.users.write().await;

        let stored = users
            .entry(user.email.clone())
            .and_modify(|existing| {
                existing.name = user.name.clone();
                existing.password_hash = user.password_hash.clone();
                existing.updated_at = now;
            })
            .or_insert_with(|| User {
                id: Uuid::new_v4(),
                email: user.email.clone(),
                name: user.name.clone(),
                password_hash: user.password_hash.clone(),
                created_at: now,
                updated_at: now,
            });

        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, hash: &str) -> NewUser {
        NewUser {
            email: "admin@example.com".into(),
            name: name.into(),
            password_hash: hash.into(),
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_id_for_same_email() {
        let store = InMemoryUserStore::new();

        let first = store.upsert(new_user("Admin", "h1")).await.unwrap();
        let second = store.upsert(new_user("Root", "h2")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Root");
        assert_eq!(second.password_hash, "h2");
        assert_eq!(store.find_by_id(first.id).await.unwrap().unwrap().name, "Root");
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let store = InMemoryUserStore::new();
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.c".into(),
            name: "A".into(),
            password_hash: "$2b$10$secret".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["email"], "a@b.c");
    }
}
