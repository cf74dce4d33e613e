//! Audit data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// ============================================================================
// Audit Query Constants
// ============================================================================

/// Default page for paginated audit listings
pub const DEFAULT_AUDIT_PAGE: i64 = 1;

/// Default page size for paginated audit listings
pub const DEFAULT_AUDIT_LIMIT: i64 = 10;

/// Default number of entries returned by an actor's history
pub const DEFAULT_USER_HISTORY_LIMIT: i64 = 50;

/// Column limits of the `audits` table
pub const MAX_TABLE_NAME_LENGTH: usize = 100;
pub const MAX_SOURCE_IP_LENGTH: usize = 45;
pub const MAX_USER_AGENT_LENGTH: usize = 255;

/// Logical table names used as `tableName` by the business modules
pub mod tables {
    pub const USERS: &str = "users";
    pub const CLIENTS: &str = "clients";
}

/// Public profile of the acting user attached to audit reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditActor {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// One immutable audit row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: Uuid,
    /// Acting user; cleared when the user is deleted
    pub actor_id: Option<Uuid>,
    /// Resolved on read; `None` once the user no longer exists
    pub actor: Option<AuditActor>,
    pub table_name: String,
    pub action: AuditAction,
    pub record_id: Option<Uuid>,
    pub previous_state: Option<JsonValue>,
    pub new_state: Option<JsonValue>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit action types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "audit_action", rename_all = "UPPERCASE")]
pub enum AuditAction {
    Login,
    Create,
    Read,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOGIN" => Ok(Self::Login),
            "CREATE" => Ok(Self::Create),
            "READ" => Ok(Self::Read),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("Unknown audit action: {}", other)),
        }
    }
}

/// Who performed an action and where the request came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditOrigin {
    pub actor_id: Option<Uuid>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditOrigin {
    pub fn new(actor_id: Option<Uuid>) -> Self {
        Self {
            actor_id,
            ..Default::default()
        }
    }

    pub fn with_source_ip(mut self, source_ip: Option<String>) -> Self {
        self.source_ip = source_ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Filters for the paginated audit listing.
///
/// All filters are conjunctive. `start_date` and `end_date` are inclusive.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(rename = "userId")]
    pub actor_id: Option<Uuid>,
    pub table_name: Option<String>,
    pub action: Option<AuditAction>,
    pub record_id: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

fn default_page() -> i64 {
    DEFAULT_AUDIT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_AUDIT_LIMIT
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            actor_id: None,
            table_name: None,
            action: None,
            record_id: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl AuditQuery {
    /// Rows to skip. Saturates, so a page past the end of `i64` is simply empty.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of audit records plus the total match count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditPage {
    pub data: Vec<AuditRecord>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Input for writing an audit record
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditRecord {
    pub actor_id: Option<Uuid>,
    pub table_name: String,
    pub action: AuditAction,
    pub record_id: Option<Uuid>,
    pub previous_state: Option<JsonValue>,
    pub new_state: Option<JsonValue>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl NewAuditRecord {
    /// Create a builder for constructing audit records
    pub fn builder() -> NewAuditRecordBuilder {
        NewAuditRecordBuilder::default()
    }
}

/// Builder for [`NewAuditRecord`]. `table_name` and `action` are required.
#[derive(Debug, Clone, Default)]
pub struct NewAuditRecordBuilder {
    actor_id: Option<Uuid>,
    table_name: Option<String>,
    action: Option<AuditAction>,
    record_id: Option<Uuid>,
    previous_state: Option<JsonValue>,
    new_state: Option<JsonValue>,
    source_ip: Option<String>,
    user_agent: Option<String>,
}

impl NewAuditRecordBuilder {
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn record_id(mut self, record_id: Option<Uuid>) -> Self {
        self.record_id = record_id;
        self
    }

    pub fn previous_state(mut self, state: JsonValue) -> Self {
        self.previous_state = Some(state);
        self
    }

    pub fn new_state(mut self, state: JsonValue) -> Self {
        self.new_state = Some(state);
        self
    }

    /// Copy actor and request provenance from an [`AuditOrigin`]
    pub fn origin(mut self, origin: &AuditOrigin) -> Self {
        self.actor_id = origin.actor_id;
        self.source_ip = origin.source_ip.clone();
        self.user_agent = origin.user_agent.clone();
        self
    }

    pub fn try_build(self) -> Result<NewAuditRecord, &'static str> {
        let table_name = self
            .table_name
            .filter(|name| !name.trim().is_empty())
            .ok_or("table_name is required")?;
        let action = self.action.ok_or("action is required")?;

        Ok(NewAuditRecord {
            actor_id: self.actor_id,
            table_name,
            action,
            record_id: self.record_id,
            previous_state: self.previous_state,
            new_state: self.new_state,
            source_ip: self.source_ip,
            user_agent: self.user_agent,
        })
    }
}
