//! Role-specific dashboard.

use storage::dto::athlete::ProfileSummary;
use storage::models::Role;

use crate::render::VERIFIED_BADGE;
use crate::session::SessionContext;

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Athlete(AthleteSection),
    Scout(ScoutSection),
    Admin(AdminSection),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AthleteSection {
    pub profile: Option<ProfileSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoutSection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdminSection;

impl AthleteSection {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Your Athlete Profile".to_string()];
        match &self.profile {
            Some(profile) => {
                let status = if profile.is_verified {
                    VERIFIED_BADGE
                } else {
                    "Pending Verification"
                };
                lines.push(format!("  Name: {}", profile.name));
                lines.push(format!("  Sport: {}", profile.sport));
                lines.push(format!("  City: {}", profile.city));
                lines.push(format!("  Status: {}", status));
                lines.push(format!("  View public profile: scout show {}", profile.id));
            }
            None => {
                lines.push(
                    "  You haven't created an athlete profile yet. Get started to be discovered by coaches and scouts."
                        .to_string(),
                );
            }
        }
        lines
    }
}

impl ScoutSection {
    fn render(&self) -> Vec<String> {
        vec![
            "Find Athletes".to_string(),
            "  Search for talented athletes in your area by sport, age, position, and level."
                .to_string(),
            "  Search athletes: scout search --help".to_string(),
        ]
    }
}

impl AdminSection {
    fn render(&self) -> Vec<String> {
        vec![
            "Admin Tools".to_string(),
            "  Review and verify athlete profiles: scout verify list".to_string(),
        ]
    }
}

impl Dashboard {
    pub fn for_session(session: &SessionContext) -> Self {
        match session.role() {
            Role::Athlete => Self::Athlete(AthleteSection {
                profile: session.profile().cloned(),
            }),
            Role::Scout => Self::Scout(ScoutSection),
            Role::Admin => Self::Admin(AdminSection),
        }
    }

    pub fn render(&self, session: &SessionContext) -> String {
        let account = session.account();
        let mut lines = vec![
            "Dashboard".to_string(),
            format!("  Email: {}", account.email.as_deref().unwrap_or("-")),
            format!("  Role: {}", account.role),
            String::new(),
        ];

        lines.extend(match self {
            Self::Athlete(section) => section.render(),
            Self::Scout(section) => section.render(),
            Self::Admin(section) => section.render(),
        });

        lines.push(String::new());
        lines.push("Quick Links".to_string());
        lines.push("  Search athletes: scout search".to_string());
        lines.push("  Sign out: scout sign-out".to_string());

        lines.join("\n")
    }
}
