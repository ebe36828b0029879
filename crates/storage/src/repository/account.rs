use sqlx::PgPool;
use crate::error::{Result, StorageError};
use crate::models::Account;

/// Read side of the authentication provider's tables.
///
/// Sessions are issued elsewhere; this repository only resolves and revokes them.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the account behind a session token
    pub async fn find_by_session_token(&self, token: &str) -> Result<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT u.id, u.email, u.role, u.created_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Sign out: drop the session so the token stops resolving
    pub async fn revoke_session(&self, token: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
