//! Create client command

use serde::Deserialize;

use crate::audit::{best_effort, tables, AuditOrigin, AuditWriter};
use crate::db::StoreError;
use crate::features::clients::store::ClientStore;
use crate::features::clients::types::{Client, NewClient, MAX_CLIENT_NAME_LENGTH};
use crate::features::shared::{validate_amount, validate_name, NameValidationError};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientCommand {
    pub name: String,
    pub salary: i64,
    pub company_value: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateClientError {
    #[error(transparent)]
    Name(#[from] NameValidationError),
    #[error("{0}")]
    Amount(String),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl CreateClientCommand {
    pub fn validate(&self) -> Result<(), CreateClientError> {
        validate_name(&self.name, MAX_CLIENT_NAME_LENGTH)?;
        validate_amount("salary", self.salary).map_err(CreateClientError::Amount)?;
        validate_amount("companyValue", self.company_value).map_err(CreateClientError::Amount)?;
        Ok(())
    }
}

#[tracing::instrument(skip(store, audit, origin, command), fields(name = %command.name))]
pub async fn handle(
    store: &dyn ClientStore,
    audit: &AuditWriter,
    origin: &AuditOrigin,
    command: CreateClientCommand,
) -> Result<Client, CreateClientError> {
    command.validate()?;

    let client = store
        .insert(NewClient {
            name: command.name.trim().to_string(),
            salary: command.salary,
            company_value: command.company_value,
        })
        .await?;

    best_effort(audit.log_create(tables::CLIENTS, client.id, client.snapshot(), origin)).await;

    tracing::info!(client_id = %client.id, "Client created");

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditStore, InMemoryAuditStore};
    use crate::features::clients::store::InMemoryClientStore;
    use std::sync::Arc;
    use uuid::Uuid;

    fn command(name: &str, salary: i64) -> CreateClientCommand {
        CreateClientCommand {
            name: name.into(),
            salary,
            company_value: 1_000,
        }
    }

    #[tokio::test]
    async fn test_create_writes_create_audit_with_new_state() {
        let clients = InMemoryClientStore::new();
        let audits = Arc::new(InMemoryAuditStore::new());
        let writer = AuditWriter::new(audits.clone());
        let actor = Uuid::new_v4();

        let client = handle(&clients, &writer, &AuditOrigin::new(Some(actor)), command("Acme", 10))
            .await
            .unwrap();

        let history = audits.find_record_history(tables::CLIENTS, client.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Create);
        assert_eq!(history[0].actor_id, Some(actor));
        assert_eq!(history[0].new_state, Some(client.snapshot()));
        assert!(history[0].previous_state.is_none());
    }

    #[tokio::test]
    async fn test_create_survives_audit_outage() {
        let clients = InMemoryClientStore::new();
        let audits = Arc::new(InMemoryAuditStore::new());
        audits.set_available(false);
        let writer = AuditWriter::new(audits.clone());

        let client = handle(&clients, &writer, &AuditOrigin::default(), command("Acme", 10))
            .await
            .unwrap();

        assert!(clients.find_active(client.id).await.unwrap().is_some());
        assert!(audits.is_empty().await);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(command("", 1).validate(), Err(CreateClientError::Name(_))));
        assert!(matches!(command("Acme", -1).validate(), Err(CreateClientError::Amount(_))));
        assert!(command(&"a".repeat(255), 0).validate().is_ok());
    }
}
