use std::time::Duration;

use anyhow::Context;
use axum::{Router, http::HeaderValue};
use storage::Database;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::athletes::handlers::search_athletes,
        features::athletes::handlers::get_athlete,
        features::athletes::handlers::create_athlete,
        features::admin::handlers::list_verification_queue,
        features::admin::handlers::toggle_verification,
        features::session::handlers::get_session,
        features::session::handlers::sign_out,
        features::vocabulary::handlers::get_vocabulary,
    ),
    components(
        schemas(
            storage::dto::athlete::AthleteProfileResponse,
            storage::dto::athlete::AthleteDetailResponse,
            storage::dto::athlete::CreateAthleteProfileRequest,
            storage::dto::athlete::VerificationEntry,
            storage::dto::athlete::ToggleVerificationRequest,
            storage::dto::athlete::ProfileSummary,
            storage::dto::account::AccountResponse,
            storage::dto::account::SessionResponse,
            storage::dto::vocabulary::VocabularyResponse,
            storage::dto::vocabulary::LevelOption,
            storage::dto::search::SortBy,
            storage::models::Level,
            storage::models::Role,
        )
    ),
    tags(
        (name = "athletes", description = "Public directory endpoints"),
        (name = "admin", description = "Profile verification"),
        (name = "session", description = "Signed-in account"),
        (name = "vocabulary", description = "Controlled vocabularies"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .build(),
                ),
            )
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

fn app(db: Database, cors: CorsLayer) -> Router {
    let api = Router::new()
        .nest("/athletes", features::athletes::routes(db.clone()))
        .nest("/admin", features::admin::routes(db.clone()))
        .nest("/session", features::session::routes(db.clone()))
        .nest("/vocabulary", features::vocabulary::routes());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting athlete directory API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(db, cors_layer(&config))).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use axum::{
        Extension,
        routing::{patch, post},
    };
    use crate::middleware::auth::CurrentSession;
    use sqlx::postgres::PgPoolOptions;
    use storage::models::{Account, Role};
    use tower::ServiceExt;

    // The pool never connects; every request below is answered before any query runs.
    fn lazy_db() -> Database {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://directory@localhost/unused")
            .unwrap();
        Database::from_pool(pool)
    }

    fn test_app() -> Router {
        app(lazy_db(), CorsLayer::new())
    }

    /// Handlers mounted without the session middleware, as if `role` had signed in.
    fn signed_in(router: Router<Database>, role: Role) -> Router {
        let session = CurrentSession {
            account: Account {
                id: uuid::Uuid::new_v4(),
                email: Some("someone@example.com".to_string()),
                role,
                created_at: Default::default(),
            },
            token: "session-token".to_string(),
        };
        router.layer(Extension(session)).with_state(lazy_db())
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        send_to(test_app(), request).await
    }

    async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_vocabulary_is_public() {
        let (status, body) = send(get("/api/vocabulary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["levels"].as_array().unwrap().len(), 4);
        assert_eq!(body["default_position"], "Other");
    }

    #[tokio::test]
    async fn test_search_rejects_page_zero() {
        let (status, body) = send(get("/api/athletes?page=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "page must be >= 1");
    }

    #[tokio::test]
    async fn test_search_rejects_malformed_age() {
        let (status, body) = send(get("/api/athletes?ageMin=teen")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_profile_id_is_not_found() {
        let (status, body) = send(get("/api/athletes/not-a-uuid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Resource not found");
    }

    #[tokio::test]
    async fn test_admin_routes_require_a_session() {
        let (status, _) = send(get("/api/admin/athletes")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_creation_requires_a_session() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/athletes")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_sign_out_requires_a_session() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/session")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_incomplete_profile_body_is_a_json_bad_request() {
        let app = signed_in(
            Router::new().route(
                "/api/athletes",
                post(features::athletes::handlers::create_athlete),
            ),
            Role::Athlete,
        );

        let request = json_request("POST", "/api/athletes", r#"{"age":17,"city":"Austin"}"#);
        let (status, body) = send_to(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_profile_creation_is_for_athletes_only() {
        let app = signed_in(
            Router::new().route(
                "/api/athletes",
                post(features::athletes::handlers::create_athlete),
            ),
            Role::Scout,
        );

        let (status, _) = send_to(app, json_request("POST", "/api/athletes", "{}")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    fn toggle_app() -> Router {
        signed_in(
            Router::new().route(
                "/api/admin/athletes/:id/verification",
                patch(features::admin::handlers::toggle_verification),
            ),
            Role::Admin,
        )
    }

    #[tokio::test]
    async fn test_toggle_with_malformed_id_is_not_found() {
        let request = json_request(
            "PATCH",
            "/api/admin/athletes/nope/verification",
            r#"{"is_verified":false}"#,
        );
        let (status, body) = send_to(toggle_app(), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Resource not found");
    }

    #[tokio::test]
    async fn test_toggle_without_flag_is_a_json_bad_request() {
        let uri = format!("/api/admin/athletes/{}/verification", uuid::Uuid::new_v4());
        let (status, body) = send_to(toggle_app(), json_request("PATCH", &uri, "{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
