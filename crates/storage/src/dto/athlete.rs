use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{AthleteProfile, Level, ProfileWithOwner};
use crate::vocabulary;

/// Public view of a profile, as listed in search results.
///
/// Contact details are never part of this shape; see [`AthleteDetailResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub country: String,
    pub sport: String,
    pub position: Option<String>,
    pub level: Level,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub graduation_year: Option<i32>,
    pub highlights_url: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_verified: bool,
    pub contact_email_visible: bool,
    pub contact_phone_visible: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full profile with contact details, each present only when its owner shares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteDetailResponse {
    #[serde(flatten)]
    pub profile: AthleteProfileResponse,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// Row of the admin verification board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VerificationEntry {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub sport: String,
    pub level: Level,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

/// Carries the verification state the caller currently sees; the stored flag
/// becomes its negation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ToggleVerificationRequest {
    pub is_verified: bool,
}

/// Short profile summary shown on the owner's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub city: String,
    pub is_verified: bool,
}

/// Request payload for creating the signed-in athlete's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_vocabulary", skip_on_field_errors = false))]
pub struct CreateAthleteProfileRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(range(
        min = 10,
        max = 120,
        message = "Please enter a valid age between 10 and 120"
    ))]
    pub age: i32,

    #[validate(length(min = 1, max = 255, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 255, message = "Country is required"))]
    pub country: String,

    #[validate(length(min = 1, max = 255, message = "Sport is required"))]
    pub sport: String,

    #[validate(length(max = 255))]
    pub position: Option<String>,

    pub level: Level,

    #[validate(length(max = 50))]
    pub height: Option<String>,

    #[validate(length(max = 50))]
    pub weight: Option<String>,

    #[validate(range(
        min = 2020,
        max = 2035,
        message = "Graduation year must be between 2020 and 2035"
    ))]
    pub graduation_year: Option<i32>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub highlights_url: Option<String>,

    #[validate(length(max = 5000))]
    pub bio: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[serde(default)]
    pub contact_email_visible: bool,

    #[serde(default)]
    pub contact_phone_visible: bool,
}

impl CreateAthleteProfileRequest {
    /// Trims every text field and turns blank optional values into `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            country: self.country.trim().to_string(),
            sport: self.sport.trim().to_string(),
            position: non_blank(self.position),
            height: non_blank(self.height),
            weight: non_blank(self.weight),
            highlights_url: non_blank(self.highlights_url),
            bio: non_blank(self.bio),
            photo_url: non_blank(self.photo_url),
            phone: non_blank(self.phone),
            ..self
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_vocabulary(req: &CreateAthleteProfileRequest) -> Result<(), ValidationError> {
    if !req.sport.is_empty() && !vocabulary::is_valid_sport(req.level, &req.sport) {
        let mut error = ValidationError::new("invalid_sport");
        error.message = Some(
            format!(
                "Sport '{}' is not offered at the {} level",
                req.sport,
                req.level.display_name()
            )
            .into(),
        );
        return Err(error);
    }

    if let Some(position) = &req.position
        && !vocabulary::is_valid_position(&req.sport, position)
    {
        let mut error = ValidationError::new("invalid_position");
        error.message =
            Some(format!("Position '{}' is not valid for {}", position, req.sport).into());
        return Err(error);
    }

    Ok(())
}

impl From<AthleteProfile> for AthleteProfileResponse {
    fn from(profile: AthleteProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            age: profile.age,
            city: profile.city,
            country: profile.country,
            sport: profile.sport,
            position: profile.position,
            level: profile.level,
            height: profile.height,
            weight: profile.weight,
            graduation_year: profile.graduation_year,
            highlights_url: profile.highlights_url,
            bio: profile.bio,
            photo_url: profile.photo_url,
            is_verified: profile.is_verified,
            contact_email_visible: profile.contact_email_visible,
            contact_phone_visible: profile.contact_phone_visible,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<ProfileWithOwner> for AthleteDetailResponse {
    fn from(row: ProfileWithOwner) -> Self {
        let contact_email = row
            .owner_email
            .filter(|_| row.profile.contact_email_visible);
        let contact_phone = row
            .profile
            .phone
            .clone()
            .filter(|_| row.profile.contact_phone_visible);

        Self {
            profile: AthleteProfileResponse::from(row.profile),
            contact_email,
            contact_phone,
        }
    }
}

impl From<AthleteProfile> for VerificationEntry {
    fn from(profile: AthleteProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            age: profile.age,
            city: profile.city,
            sport: profile.sport,
            level: profile.level,
            is_verified: profile.is_verified,
            created_at: profile.created_at,
        }
    }
}

impl From<AthleteProfile> for ProfileSummary {
    fn from(profile: AthleteProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            sport: profile.sport,
            city: profile.city,
            is_verified: profile.is_verified,
        }
    }
}
