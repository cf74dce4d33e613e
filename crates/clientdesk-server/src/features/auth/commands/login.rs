//! Login command
//!
//! Verifies credentials, issues an access token and records a LOGIN audit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{best_effort, AuditWriter};
use crate::db::StoreError;
use crate::features::auth::jwt::JwtKeys;
use crate::features::auth::users::UserStore;
use crate::features::shared::RequestContext;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Email and password are required")]
    MissingCredentials,
    /// Unknown email and wrong password are indistinguishable to the caller
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Failed to issue access token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Password verification task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl LoginCommand {
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(users, keys, audit, ctx, command), fields(email = %command.email))]
pub async fn handle(
    users: &dyn UserStore,
    keys: &JwtKeys,
    audit: &AuditWriter,
    ctx: &RequestContext,
    command: LoginCommand,
) -> Result<LoginResponse, LoginError> {
    command.validate()?;

    let user = users
        .find_by_email(command.email.trim())
        .await?
        .ok_or(LoginError::InvalidCredentials)?;

    let password = command.password;
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;

    // A malformed stored hash is treated like a wrong password
    if !verified.unwrap_or(false) {
        tracing::info!("Login rejected");
        return Err(LoginError::InvalidCredentials);
    }

    let access_token = keys.issue(user.id, &user.email)?;

    best_effort(audit.log_login(&ctx.origin(Some(user.id)))).await;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(LoginResponse {
        access_token,
        user: LoginUser {
            id: user.id,
            email: user.email,
            name: user.name,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditStore, InMemoryAuditStore};
    use crate::config::AuthConfig;
    use crate::features::auth::users::{InMemoryUserStore, NewUser};
    use std::sync::Arc;

    struct Fixture {
        users: InMemoryUserStore,
        keys: JwtKeys,
        audits: Arc<InMemoryAuditStore>,
        writer: AuditWriter,
        user_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let users = InMemoryUserStore::new();
        let user = users
            .upsert(NewUser {
                email: "admin@example.com".into(),
                name: "Admin".into(),
                password_hash: bcrypt::hash("password123", 4).unwrap(),
            })
            .await
            .unwrap();
        let audits = Arc::new(InMemoryAuditStore::new());

        Fixture {
            users,
            keys: JwtKeys::new(&AuthConfig {
                jwt_secret: "test".into(),
                jwt_expires_in_secs: 60,
            }),
            writer: AuditWriter::new(audits.clone()),
            audits,
            user_id: user.id,
        }
    }

    fn command(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_success_writes_login_audit() {
        let f = fixture().await;

        let response = handle(
            &f.users,
            &f.keys,
            &f.writer,
            &RequestContext::default(),
            command("admin@example.com", "password123"),
        )
        .await
        .unwrap();

        assert_eq!(response.user.id, f.user_id);
        assert_eq!(f.keys.verify(&response.access_token).unwrap().sub, f.user_id);

        let history = f.audits.find_by_actor(f.user_id, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Login);
        assert_eq!(history[0].record_id, Some(f.user_id));
    }

    #[tokio::test]
    async fn test_bad_credentials_write_no_audit() {
        let f = fixture().await;

        for (email, password) in [
            ("admin@example.com", "wrong"),
            ("nobody@example.com", "password123"),
        ] {
            let err = handle(
                &f.users,
                &f.keys,
                &f.writer,
                &RequestContext::default(),
                command(email, password),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, LoginError::InvalidCredentials));
        }

        assert!(f.audits.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_succeeds_during_audit_outage() {
        let f = fixture().await;
        f.audits.set_available(false);

        let result = handle(
            &f.users,
            &f.keys,
            &f.writer,
            &RequestContext::default(),
            command("admin@example.com", "password123"),
        )
        .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            command("", "x").validate(),
            Err(LoginError::MissingCredentials)
        ));
    }
}
