use storage::dto::{
    account::SessionResponse,
    athlete::{AthleteDetailResponse, AthleteProfileResponse, VerificationEntry},
    common::SearchPage,
    search::SearchFilters,
};
use uuid::Uuid;

use crate::Result;

/// Everything the views need from the directory backend.
#[async_trait::async_trait]
pub trait DirectoryBackend: Send + Sync {
    async fn search(&self, filters: &SearchFilters) -> Result<SearchPage<AthleteProfileResponse>>;

    async fn profile(&self, id: Uuid) -> Result<AthleteDetailResponse>;

    async fn verification_queue(&self) -> Result<Vec<VerificationEntry>>;

    /// Flip the flag; `current` is the state the caller is looking at.
    async fn toggle_verification(&self, id: Uuid, current: bool) -> Result<VerificationEntry>;

    async fn current_session(&self) -> Result<SessionResponse>;

    async fn sign_out(&self) -> Result<()>;
}
