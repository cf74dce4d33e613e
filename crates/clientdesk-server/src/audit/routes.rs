//! Audit API routes (read only)
//!
//! - `GET /api/audits` - Paginated listing; filters `userId`, `tableName`,
//!   `action`, `recordId`, `startDate`, `endDate`
//! - `GET /api/audits/:id` - A single record
//! - `GET /api/audits/record/:tableName/:recordId` - History of one business record
//! - `GET /api/audits/user/:userId?limit` - An actor's recent actions

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::models::{AuditQuery, DEFAULT_USER_HISTORY_LIMIT};
use super::queries;
use super::writer::AuditError;
use crate::api::response::{internal_error, not_found, validation_error, ApiResponse};
use crate::features::auth::AuthUser;
use crate::state::AppState;

pub fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_audits))
        .route("/:id", get(get_audit))
        .route("/record/:table_name/:record_id", get(record_history))
        .route("/user/:user_id", get(user_history))
}

#[derive(Debug, Deserialize)]
struct UserHistoryParams {
    limit: Option<i64>,
}

#[tracing::instrument(skip(state, _user))]
async fn list_audits(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<AuditQuery>,
) -> Result<Response, AuditApiError> {
    let page = queries::query_audits(state.audits.as_ref(), query).await?;

    tracing::debug!(count = page.data.len(), total = page.total, "Audits listed via API");

    Ok(ApiResponse::success(page).into_response())
}

#[tracing::instrument(skip(state, _user), fields(audit_id = %id))]
async fn get_audit(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AuditApiError> {
    let record = queries::find_audit(state.audits.as_ref(), id).await?;
    Ok(ApiResponse::success(record).into_response())
}

#[tracing::instrument(skip(state, _user))]
async fn record_history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((table_name, record_id)): Path<(String, Uuid)>,
) -> Result<Response, AuditApiError> {
    let records =
        queries::find_record_history(state.audits.as_ref(), &table_name, record_id).await?;
    Ok(ApiResponse::success(records).into_response())
}

#[tracing::instrument(skip(state, _user))]
async fn user_history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<Uuid>,
    Query(params): Query<UserHistoryParams>,
) -> Result<Response, AuditApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_USER_HISTORY_LIMIT);
    let records = queries::find_by_user(state.audits.as_ref(), user_id, limit).await?;
    Ok(ApiResponse::success(records).into_response())
}

#[derive(Debug)]
struct AuditApiError(AuditError);

impl From<AuditError> for AuditApiError {
    fn from(err: AuditError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuditApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AuditError::Validation(message) => validation_error(message),
            AuditError::NotFound(id) => not_found(format!("Audit record '{}' not found", id)),
            AuditError::Storage(e) => {
                tracing::error!(error = %e, "Audit storage error");
                internal_error()
            },
        }
    }
}
