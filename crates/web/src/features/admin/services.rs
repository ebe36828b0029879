use sqlx::PgPool;
use storage::{
    dto::athlete::VerificationEntry, error::Result, repository::athlete::AthleteRepository,
};
use uuid::Uuid;

/// Every profile, newest first
pub async fn list_verification_queue(pool: &PgPool) -> Result<Vec<VerificationEntry>> {
    let repo = AthleteRepository::new(pool);
    let profiles = repo.list_newest_first().await?;
    Ok(profiles.into_iter().map(VerificationEntry::from).collect())
}

/// Write the negation of the verification state the caller saw
pub async fn toggle_verification(
    pool: &PgPool,
    id: Uuid,
    current: bool,
) -> Result<VerificationEntry> {
    let repo = AthleteRepository::new(pool);
    let profile = repo.set_verified(id, !current).await?;
    Ok(VerificationEntry::from(profile))
}
