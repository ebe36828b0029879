use storage::dto::{account::AccountResponse, athlete::ProfileSummary};
use storage::models::Role;

use crate::Result;
use crate::traits::DirectoryBackend;

/// The signed-in account, resolved once when the client starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    account: AccountResponse,
    profile: Option<ProfileSummary>,
}

impl SessionContext {
    pub async fn init<B>(backend: &B) -> Result<Self>
    where
        B: DirectoryBackend + ?Sized,
    {
        let session = backend.current_session().await?;
        tracing::debug!(
            account = %session.account.id,
            role = %session.account.role,
            "Session resolved"
        );
        Ok(Self {
            account: session.account,
            profile: session.profile,
        })
    }

    pub fn account(&self) -> &AccountResponse {
        &self.account
    }

    pub fn role(&self) -> Role {
        self.account.role
    }

    /// The athlete's own profile, if one has been created
    pub fn profile(&self) -> Option<&ProfileSummary> {
        self.profile.as_ref()
    }

    /// Revoke the session. The context is consumed.
    pub async fn teardown<B>(self, backend: &B) -> Result<()>
    where
        B: DirectoryBackend + ?Sized,
    {
        backend.sign_out().await?;
        tracing::info!(account = %self.account.id, "Signed out");
        Ok(())
    }
}
