use sqlx::PgPool;
use storage::{
    dto::{
        account::{AccountResponse, SessionResponse},
        athlete::ProfileSummary,
    },
    error::Result,
    models::{Account, Role},
    repository::{account::AccountRepository, athlete::AthleteRepository},
};

/// Describe the signed-in account; athletes also get their own profile
pub async fn describe_session(pool: &PgPool, account: Account) -> Result<SessionResponse> {
    let profile = match account.role {
        Role::Athlete => AthleteRepository::new(pool)
            .find_by_owner(account.id)
            .await?
            .map(ProfileSummary::from),
        Role::Scout | Role::Admin => None,
    };

    Ok(SessionResponse {
        account: AccountResponse::from(account),
        profile,
    })
}

pub async fn sign_out(pool: &PgPool, token: &str) -> Result<()> {
    let repo = AccountRepository::new(pool);
    repo.revoke_session(token).await
}
