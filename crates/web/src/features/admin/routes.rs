use axum::{
    Router, middleware,
    routing::{get, patch},
};
use storage::Database;

use super::handlers::{list_verification_queue, toggle_verification};
use crate::middleware::auth::{require_admin, require_session};

pub fn routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/athletes", get(list_verification_queue))
        .route("/athletes/:id/verification", patch(toggle_verification))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(db, require_session))
}
