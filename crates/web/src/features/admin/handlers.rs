use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::athlete::{ToggleVerificationRequest, VerificationEntry},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::CurrentSession;

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/athletes",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All profiles, newest first", body = Vec<VerificationEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "admin"
)]
pub async fn list_verification_queue(State(db): State<Database>) -> Result<Response, WebError> {
    let entries = services::list_verification_queue(db.pool()).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/admin/athletes/{id}/verification",
    params(
        ("id" = Uuid, Path, description = "Athlete profile ID")
    ),
    request_body = ToggleVerificationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Verification flag flipped", body = VerificationEntry),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "admin"
)]
pub async fn toggle_verification(
    State(db): State<Database>,
    Extension(session): Extension<CurrentSession>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ToggleVerificationRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id.map_err(|_| WebError::NotFound)?;
    let Json(req) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;

    let entry = services::toggle_verification(db.pool(), id, req.is_verified).await?;

    tracing::info!(
        profile_id = %id,
        admin_id = %session.account.id,
        is_verified = entry.is_verified,
        "Verification toggled"
    );

    Ok(Json(entry).into_response())
}
