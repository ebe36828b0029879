use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_athlete, get_athlete, search_athletes};
use crate::middleware::auth::require_session;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_athlete))
        .route_layer(middleware::from_fn_with_state(db, require_session));

    Router::new()
        .route("/", get(search_athletes))
        .route("/:id", get(get_athlete))
        .merge(protected)
}
