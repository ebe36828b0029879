use storage::dto::athlete::{AthleteDetailResponse, AthleteProfileResponse};
use uuid::Uuid;

use crate::Result;
use crate::render::VERIFIED_BADGE;
use crate::traits::DirectoryBackend;

/// A contact channel as seen by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactField {
    Shared(String),
    NotShared,
}

impl From<Option<String>> for ContactField {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(value) => Self::Shared(value),
            None => Self::NotShared,
        }
    }
}

impl ContactField {
    fn render(&self, label: &str) -> String {
        match self {
            Self::Shared(value) => format!("{}: {}", label, value),
            Self::NotShared => format!("{} not shared", label),
        }
    }
}

/// One athlete's full profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDetail {
    pub athlete: AthleteProfileResponse,
    pub email: ContactField,
    pub phone: ContactField,
}

impl From<AthleteDetailResponse> for ProfileDetail {
    fn from(detail: AthleteDetailResponse) -> Self {
        Self {
            athlete: detail.profile,
            email: detail.contact_email.into(),
            phone: detail.contact_phone.into(),
        }
    }
}

impl ProfileDetail {
    /// Fetch a single profile. A missing profile surfaces as
    /// [`ClientError::NotFound`](crate::ClientError::NotFound).
    pub async fn load<B>(backend: &B, id: Uuid) -> Result<Self>
    where
        B: DirectoryBackend + ?Sized,
    {
        let detail = backend.profile(id).await?;
        Ok(detail.into())
    }

    pub fn render(&self) -> String {
        let athlete = &self.athlete;
        let mut lines = Vec::new();

        lines.push(athlete.name.clone());
        if athlete.is_verified {
            lines.push(format!("{} Profile", VERIFIED_BADGE));
        }
        lines.push(String::new());

        lines.push(format!("Age: {}", athlete.age));
        lines.push(format!("Location: {}, {}", athlete.city, athlete.country));
        lines.push(format!("Sport: {}", athlete.sport));
        lines.push(format!("Level: {}", athlete.level.display_name()));
        if let Some(position) = &athlete.position {
            lines.push(format!("Position: {}", position));
        }
        if let Some(height) = &athlete.height {
            lines.push(format!("Height: {}", height));
        }
        if let Some(weight) = &athlete.weight {
            lines.push(format!("Weight: {} lbs", weight));
        }
        if let Some(year) = athlete.graduation_year {
            lines.push(format!("Graduation Year: {}", year));
        }

        lines.push(String::new());
        lines.push("Contact".to_string());
        lines.push(format!("  {}", self.email.render("Email")));
        lines.push(format!("  {}", self.phone.render("Phone")));

        if let Some(bio) = &athlete.bio {
            lines.push(String::new());
            lines.push("About".to_string());
            lines.push(format!("  {}", bio));
        }
        if let Some(url) = &athlete.highlights_url {
            lines.push(String::new());
            lines.push(format!("Highlights: {}", url));
        }

        lines.push(String::new());
        lines.push(format!(
            "Profile created on {}",
            athlete.created_at.format("%Y-%m-%d")
        ));

        lines.join("\n")
    }
}
