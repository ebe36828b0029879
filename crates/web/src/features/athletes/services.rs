use sqlx::PgPool;
use storage::{
    dto::{
        athlete::{AthleteDetailResponse, AthleteProfileResponse, CreateAthleteProfileRequest},
        common::SearchPage,
        search::SearchFilters,
    },
    error::Result,
    models::AthleteProfile,
    repository::athlete::AthleteRepository,
    search::SearchQuery,
};
use uuid::Uuid;

/// Translate the filters, run the search and package the window with its
/// paging metadata
pub async fn search_athletes(
    pool: &PgPool,
    filters: &SearchFilters,
) -> Result<SearchPage<AthleteProfileResponse>> {
    let repo = AthleteRepository::new(pool);
    let query = SearchQuery::from_filters(filters);

    tracing::debug!(?query, "Running directory search");
    let (profiles, total_items) = repo.search(&query).await?;

    Ok(SearchPage::new(profiles, total_items, filters.page).map(AthleteProfileResponse::from))
}

/// Get one profile with its shareable contact details
pub async fn get_athlete_detail(pool: &PgPool, id: Uuid) -> Result<AthleteDetailResponse> {
    let repo = AthleteRepository::new(pool);
    let row = repo.find_with_owner(id).await?;
    Ok(AthleteDetailResponse::from(row))
}

/// Create the profile owned by `user_id`
pub async fn create_athlete(
    pool: &PgPool,
    user_id: Uuid,
    request: &CreateAthleteProfileRequest,
) -> Result<AthleteProfile> {
    let repo = AthleteRepository::new(pool);
    repo.create(user_id, request).await
}
