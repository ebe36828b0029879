use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Competitive tier of an athlete. Constrains which sports may be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "athlete_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Level {
    HighSchool,
    College,
    Academy,
    SemiPro,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::HighSchool,
        Level::College,
        Level::Academy,
        Level::SemiPro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::College => "college",
            Self::Academy => "academy",
            Self::SemiPro => "semi_pro",
        }
    }

    /// Human label used in selection lists.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighSchool => "High School",
            Self::College => "College/University",
            Self::Academy => "Academy",
            Self::SemiPro => "Semi-Pro",
        }
    }

    /// Stored value with underscores replaced by spaces, as shown on cards.
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown level '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthleteProfile {
    pub id: Uuid,
    pub user_id: Uuid,
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
    pub phone: Option<String>,
    pub is_verified: bool,
    pub contact_email_visible: bool,
    pub contact_phone_visible: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// A profile joined with the email of the account that owns it.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileWithOwner {
    #[sqlx(flatten)]
    pub profile: AthleteProfile,
    pub owner_email: Option<String>,
}
