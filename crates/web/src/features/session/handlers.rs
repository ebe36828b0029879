use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::account::SessionResponse};

use crate::error::WebError;
use crate::middleware::auth::CurrentSession;

use super::services;

#[utoipa::path(
    get,
    path = "/api/session",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The signed-in account", body = SessionResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "session"
)]
pub async fn get_session(
    State(db): State<Database>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Response, WebError> {
    let response = services::describe_session(db.pool(), session.account).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/session",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "session"
)]
pub async fn sign_out(
    State(db): State<Database>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Response, WebError> {
    services::sign_out(db.pool(), &session.token).await?;
    tracing::info!(account_id = %session.account.id, "Signed out");

    Ok(StatusCode::NO_CONTENT.into_response())
}
