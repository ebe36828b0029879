use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        athlete::{AthleteDetailResponse, AthleteProfileResponse, CreateAthleteProfileRequest},
        common::SearchPage,
        search::SearchFilters,
    },
    models::Role,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentSession;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes",
    params(SearchFilters),
    responses(
        (status = 200, description = "One page of matching athletes", body = SearchPage<AthleteProfileResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Search failed")
    ),
    tag = "athletes"
)]
pub async fn search_athletes(
    State(db): State<Database>,
    query: Result<Query<SearchFilters>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(filters) = query.map_err(|e| WebError::BadRequest(e.body_text()))?;
    filters.validate().map_err(WebError::BadRequest)?;

    let page = services::search_athletes(db.pool(), &filters)
        .await
        .map_err(|e| {
            tracing::error!("Search error: {:?}", e);
            WebError::SearchFailed
        })?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete profile ID")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteDetailResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete(
    State(db): State<Database>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, WebError> {
    // A malformed ID cannot name any profile.
    let Path(id) = id.map_err(|_| WebError::NotFound)?;

    let athlete = services::get_athlete_detail(db.pool(), id).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes",
    request_body = CreateAthleteProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Profile created", body = AthleteProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only athlete accounts own profiles"),
        (status = 409, description = "This account already has a profile")
    ),
    tag = "athletes"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    Extension(session): Extension<CurrentSession>,
    body: Result<Json<CreateAthleteProfileRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    if session.account.role != Role::Athlete {
        return Err(WebError::Forbidden);
    }
    let Json(req) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;

    let req = req.normalized();
    req.validate()?;

    let profile = services::create_athlete(db.pool(), session.account.id, &req).await?;
    tracing::info!(profile_id = %profile.id, account_id = %session.account.id, "Athlete profile created");

    Ok((StatusCode::CREATED, Json(AthleteProfileResponse::from(profile))).into_response())
}
