//! Development admin seeding

use crate::config::SeedConfig;
use crate::db::StoreError;
use crate::features::auth::{NewUser, User, UserStore, PASSWORD_HASH_COST};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to hash admin password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Failed to store admin user: {0}")]
    Store(#[from] StoreError),
}

/// Create or reset the configured admin account
pub async fn seed_admin(users: &dyn UserStore, config: &SeedConfig) -> Result<User, SeedError> {
    let password = config.admin_password.clone();
    let password_hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, PASSWORD_HASH_COST)).await??;

    let user = users
        .upsert(NewUser {
            email: config.admin_email.clone(),
            name: config.admin_name.clone(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin user seeded");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::InMemoryUserStore;

    #[tokio::test]
    async fn test_seeded_password_verifies() {
        let users = InMemoryUserStore::new();
        let config = SeedConfig {
            enabled: true,
            admin_email: "admin@example.com".into(),
            admin_password: "password123".into(),
            admin_name: "Administrator".into(),
        };

        let user = seed_admin(&users, &config).await.unwrap();

        assert!(bcrypt::verify("password123", &user.password_hash).unwrap());
        let stored = users.find_by_email("admin@example.com").await.unwrap().unwrap();
        assert_eq!(stored.id, user.id);
    }
}
