use storage::dto::athlete::AthleteProfileResponse;

pub const VERIFIED_BADGE: &str = "✓ Verified";

/// One search result as a text card.
pub fn athlete_card(athlete: &AthleteProfileResponse) -> String {
    let mut lines = Vec::with_capacity(4);

    let mut title = athlete.name.clone();
    if athlete.is_verified {
        title.push_str("  ");
        title.push_str(VERIFIED_BADGE);
    }
    lines.push(title);
    lines.push(format!("  id: {}", athlete.id));
    lines.push(format!(
        "  {} · {}, {}",
        athlete.age, athlete.city, athlete.country
    ));

    let mut sport = athlete.sport.clone();
    if let Some(position) = &athlete.position {
        sport.push_str(" - ");
        sport.push_str(position);
    }
    lines.push(format!("  {} · {}", sport, athlete.level.display_name()));

    lines.join("\n")
}
