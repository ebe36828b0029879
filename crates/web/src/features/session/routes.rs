use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{get_session, sign_out};
use crate::middleware::auth::require_session;

pub fn routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/", get(get_session).delete(sign_out))
        .route_layer(middleware::from_fn_with_state(db, require_session))
}
