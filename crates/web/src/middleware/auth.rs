use axum::{
    Extension,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use storage::{
    Database, error::StorageError, models::Account, repository::account::AccountRepository,
};

use crate::error::WebError;

/// The signed-in account resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub account: Account,
    pub token: String,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a live session and exposes [`CurrentSession`]
/// to the handlers behind it.
pub async fn require_session(
    State(db): State<Database>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(req.headers())
        .ok_or(WebError::Unauthorized)?
        .to_string();

    let account = match AccountRepository::new(db.pool())
        .find_by_session_token(&token)
        .await
    {
        Ok(account) => account,
        Err(StorageError::NotFound) => {
            tracing::warn!("Rejected unknown session token");
            return Err(WebError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    };

    req.extensions_mut().insert(CurrentSession { account, token });

    Ok(next.run(req).await)
}

/// Must sit behind [`require_session`].
pub async fn require_admin(
    Extension(session): Extension<CurrentSession>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    if !session.account.is_admin() {
        tracing::warn!(
            account_id = %session.account.id,
            role = %session.account.role,
            "Denied admin access"
        );
        return Err(WebError::Forbidden);
    }

    Ok(next.run(req).await)
}
