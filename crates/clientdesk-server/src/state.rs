//! Shared application state handed to every router

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::audit::{AuditStore, AuditWriter, InMemoryAuditStore, PgAuditStore};
use crate::config::AuthConfig;
use crate::features::auth::jwt::JwtKeys;
use crate::features::auth::users::{InMemoryUserStore, PgUserStore, UserStore};
use crate::features::clients::store::{ClientStore, InMemoryClientStore, PgClientStore};

/// Which storage the stores talk to, kept for health reporting
#[derive(Debug, Clone)]
pub enum Backend {
    Postgres(PgPool),
    Memory,
}

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientStore>,
    pub users: Arc<dyn UserStore>,
    pub audits: Arc<dyn AuditStore>,
    pub audit: AuditWriter,
    pub jwt: JwtKeys,
    pub backend: Backend,
}

impl AppState {
    pub fn new(
        clients: Arc<dyn ClientStore>,
        users: Arc<dyn UserStore>,
        audits: Arc<dyn AuditStore>,
        jwt: JwtKeys,
        backend: Backend,
    ) -> Self {
        Self {
            audit: AuditWriter::new(audits.clone()),
            clients,
            users,
            audits,
            jwt,
            backend,
        }
    }

    pub fn postgres(pool: PgPool, auth: &AuthConfig) -> Self {
        Self::new(
            Arc::new(PgClientStore::new(pool.clone())),
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgAuditStore::new(pool.clone())),
            JwtKeys::new(auth),
            Backend::Postgres(pool),
        )
    }

    pub fn in_memory(auth: &AuthConfig) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        Self::new(
            Arc::new(InMemoryClientStore::new()),
            users.clone(),
            Arc::new(InMemoryAuditStore::with_users(users)),
            JwtKeys::new(auth),
            Backend::Memory,
        )
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
