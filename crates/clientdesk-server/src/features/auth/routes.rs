//! Authentication routes
//!
//! - `POST /api/auth/login` - Exchange email and password for an access token

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::commands::{LoginCommand, LoginError};
use crate::api::response::{internal_error, unauthorized, validation_error, ApiResponse};
use crate::features::shared::RequestContext;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// # Response
///
/// - `200 OK` - `{ access_token, user: { id, email, name } }`
/// - `400 Bad Request` - Missing email or password
/// - `401 Unauthorized` - Unknown email or wrong password
#[tracing::instrument(skip(state, ctx, command))]
async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(command): Json<LoginCommand>,
) -> Result<Response, AuthApiError> {
    let response =
        super::commands::login::handle(state.users.as_ref(), &state.jwt, &state.audit, &ctx, command)
            .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[derive(Debug)]
struct AuthApiError(LoginError);

impl From<LoginError> for AuthApiError {
    fn from(err: LoginError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        match self.0 {
            LoginError::MissingCredentials => validation_error(self.0.to_string()),
            LoginError::InvalidCredentials => unauthorized("Invalid credentials"),
            LoginError::Token(_) | LoginError::Store(_) | LoginError::Task(_) => {
                tracing::error!(error = %self.0, "Login failed");
                internal_error()
            },
        }
    }
}
