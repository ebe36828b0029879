use storage::dto::athlete::VerificationEntry;
use uuid::Uuid;

use crate::Result;
use crate::render::VERIFIED_BADGE;
use crate::traits::DirectoryBackend;

/// Admin list of every profile with its verification state.
#[derive(Debug, Clone, Default)]
pub struct VerificationBoard {
    rows: Vec<VerificationEntry>,
    error: Option<String>,
}

impl VerificationBoard {
    pub async fn load<B>(backend: &B) -> Result<Self>
    where
        B: DirectoryBackend + ?Sized,
    {
        Ok(Self {
            rows: backend.verification_queue().await?,
            error: None,
        })
    }

    pub fn rows(&self) -> &[VerificationEntry] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Flip one profile's flag. On success the row is updated in place; on
    /// failure it keeps its old state and the error is recorded.
    pub async fn toggle<B>(&mut self, backend: &B, id: Uuid) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        let Some(index) = self.rows.iter().position(|row| row.id == id) else {
            self.error = Some(format!("No profile {} on the board", id));
            return false;
        };
        let current = self.rows[index].is_verified;

        match backend.toggle_verification(id, current).await {
            Ok(_) => {
                self.rows[index].is_verified = !current;
                self.error = None;
                tracing::info!(%id, verified = !current, "Verification updated");
                true
            }
            Err(e) => {
                tracing::warn!(%id, "Verification update failed: {}", e);
                self.error = Some(format!("Failed to update verification: {}", e));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        if let Some(error) = &self.error {
            lines.push(format!("Error: {}", error));
        }
        if self.rows.is_empty() {
            lines.push("No athlete profiles yet.".to_string());
        }
        for row in &self.rows {
            let state = if row.is_verified {
                VERIFIED_BADGE
            } else {
                "Unverified"
            };
            lines.push(format!(
                "{}  {} ({}) · {} · {} · {}  [{}]",
                row.id,
                row.name,
                row.age,
                row.city,
                row.sport,
                row.level.display_name(),
                state
            ));
        }
        lines.join("\n")
    }
}
