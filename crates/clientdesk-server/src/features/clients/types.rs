//! Client entity and the shared types of the clients feature

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

pub const MAX_CLIENT_NAME_LENGTH: usize = 255;

/// A client record. Monetary amounts are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub salary: i64,
    pub company_value: i64,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; a set value hides the client everywhere
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Full state as stored in audit snapshots
    pub fn snapshot(&self) -> JsonValue {
        json!({
            "id": self.id,
            "name": self.name,
            "salary": self.salary,
            "companyValue": self.company_value,
            "viewCount": self.view_count,
            "createdAt": self.created_at,
            "updatedAt": self.updated_at,
            "deletedAt": self.deleted_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub salary: i64,
    pub company_value: i64,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub company_value: Option<i64>,
}

impl ClientChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.salary.is_none() && self.company_value.is_none()
    }

    pub fn apply(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(salary) = self.salary {
            client.salary = salary;
        }
        if let Some(company_value) = self.company_value {
            client.company_value = company_value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientSortField {
    Name,
    Salary,
    CompanyValue,
    ViewCount,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ClientSortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Salary => "salary",
            Self::CompanyValue => "company_value",
            Self::ViewCount => "view_count",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[default]
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Store-level listing filter over non-deleted clients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientListFilter {
    pub search: Option<String>,
    pub order_by: ClientSortField,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

/// Dashboard counters over non-deleted clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetrics {
    pub total_clients: i64,
    pub clients_today: i64,
    pub most_viewed_count: i64,
}
