//! Client API routes
//!
//! All routes require a bearer token; the token's user is the audit actor.
//!
//! - `POST /api/clients` - Create a client
//! - `GET /api/clients` - List clients (`page`, `limit`, `search`, `orderBy`, `order`)
//! - `GET /api/clients/metrics` - Dashboard counters
//! - `GET /api/clients/:id` - Get a client (untracked)
//! - `POST /api/clients/:id/view` - Tracked read
//! - `PUT /api/clients/:id` - Partially update a client
//! - `DELETE /api/clients/:id` - Soft-delete a client

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::{
    commands::{
        CreateClientCommand, CreateClientError, DeleteClientError, RecordViewError,
        UpdateClientCommand, UpdateClientError,
    },
    queries::{GetClientError, ListClientsError, ListClientsQuery},
};
use crate::api::response::{internal_error, not_found, validation_error, ApiResponse};
use crate::db::StoreError;
use crate::features::auth::AuthUser;
use crate::features::shared::RequestContext;
use crate::state::AppState;

pub fn clients_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_client).get(list_clients))
        .route("/metrics", get(client_metrics))
        .route("/:id", get(get_client).put(update_client).delete(delete_client))
        .route("/:id/view", post(view_client))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

#[tracing::instrument(skip(state, ctx, command), fields(actor_id = %user.id))]
async fn create_client(
    State(state): State<AppState>,
    user: AuthUser,
    ctx: RequestContext,
    Json(command): Json<CreateClientCommand>,
) -> Result<Response, ClientApiError> {
    let client = super::commands::create::handle(
        state.clients.as_ref(),
        &state.audit,
        &ctx.origin(Some(user.id)),
        command,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(client))).into_response())
}

#[tracing::instrument(skip(state, ctx, command), fields(actor_id = %user.id, client_id = %id))]
async fn update_client(
    State(state): State<AppState>,
    user: AuthUser,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(command): Json<UpdateClientCommand>,
) -> Result<Response, ClientApiError> {
    let client = super::commands::update::handle(
        state.clients.as_ref(),
        &state.audit,
        &ctx.origin(Some(user.id)),
        id,
        command,
    )
    .await?;

    Ok(ApiResponse::success(client).into_response())
}

#[tracing::instrument(skip(state, ctx), fields(actor_id = %user.id, client_id = %id))]
async fn delete_client(
    State(state): State<AppState>,
    user: AuthUser,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Response, ClientApiError> {
    let response = super::commands::delete::handle(
        state.clients.as_ref(),
        &state.audit,
        &ctx.origin(Some(user.id)),
        id,
    )
    .await?;

    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(state, ctx), fields(actor_id = %user.id, client_id = %id))]
async fn view_client(
    State(state): State<AppState>,
    user: AuthUser,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Response, ClientApiError> {
    let client = super::commands::record_view::handle(
        state.clients.as_ref(),
        &state.audit,
        &ctx.origin(Some(user.id)),
        id,
    )
    .await?;

    Ok(ApiResponse::success(client).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(state, _user), fields(client_id = %id))]
async fn get_client(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ClientApiError> {
    let client = super::queries::get::handle(state.clients.as_ref(), id).await?;
    Ok(ApiResponse::success(client).into_response())
}

#[tracing::instrument(skip(state, _user, query))]
async fn list_clients(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListClientsQuery>,
) -> Result<Response, ClientApiError> {
    let page = super::queries::list::handle(state.clients.as_ref(), query).await?;

    tracing::debug!(count = page.data.len(), total = page.total, "Clients listed via API");

    Ok(ApiResponse::success(page).into_response())
}

#[tracing::instrument(skip(state, _user))]
async fn client_metrics(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ClientApiError> {
    let metrics = super::queries::metrics::handle(state.clients.as_ref()).await?;
    Ok(ApiResponse::success(metrics).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for client API endpoints
#[derive(Debug)]
enum ClientApiError {
    Create(CreateClientError),
    Update(UpdateClientError),
    Delete(DeleteClientError),
    View(RecordViewError),
    Get(GetClientError),
    List(ListClientsError),
    Store(StoreError),
}

impl From<CreateClientError> for ClientApiError {
    fn from(err: CreateClientError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateClientError> for ClientApiError {
    fn from(err: UpdateClientError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteClientError> for ClientApiError {
    fn from(err: DeleteClientError) -> Self {
        Self::Delete(err)
    }
}

impl From<RecordViewError> for ClientApiError {
    fn from(err: RecordViewError) -> Self {
        Self::View(err)
    }
}

impl From<GetClientError> for ClientApiError {
    fn from(err: GetClientError) -> Self {
        Self::Get(err)
    }
}

impl From<ListClientsError> for ClientApiError {
    fn from(err: ListClientsError) -> Self {
        Self::List(err)
    }
}

impl From<StoreError> for ClientApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

fn storage_failure(err: &StoreError) -> Response {
    tracing::error!(error = %err, "Storage error in clients API");
    internal_error()
}

impl IntoResponse for ClientApiError {
    fn into_response(self) -> Response {
        match self {
            ClientApiError::Create(CreateClientError::Store(ref e)) => storage_failure(e),
            ClientApiError::Create(e) => validation_error(e.to_string()),

            ClientApiError::Update(UpdateClientError::NotFound(_)) => {
                not_found("Client not found")
            },
            ClientApiError::Update(UpdateClientError::Store(ref e)) => storage_failure(e),
            ClientApiError::Update(e) => validation_error(e.to_string()),

            ClientApiError::Delete(DeleteClientError::NotFound(_))
            | ClientApiError::View(RecordViewError::NotFound(_))
            | ClientApiError::Get(GetClientError::NotFound(_)) => not_found("Client not found"),

            ClientApiError::Delete(DeleteClientError::Store(ref e))
            | ClientApiError::View(RecordViewError::Store(ref e))
            | ClientApiError::Get(GetClientError::Store(ref e))
            | ClientApiError::List(ListClientsError::Store(ref e))
            | ClientApiError::Store(ref e) => storage_failure(e),

            ClientApiError::List(ListClientsError::InvalidPagination(message)) => {
                validation_error(message)
            },
        }
    }
}
