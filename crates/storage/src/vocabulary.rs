//! Controlled vocabularies for sports and positions.
//!
//! The tables are built once on first access and never mutated afterwards.

use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;

use crate::models::Level;

pub const DEFAULT_POSITION: &str = "Other";

const HIGH_SCHOOL_SPORTS: &[&str] = &[
    "American Football",
    "Baseball",
    "Basketball",
    "Cross Country",
    "Field Hockey",
    "Golf",
    "Ice Hockey",
    "Lacrosse",
    "Soccer",
    "Softball",
    "Swimming & Diving",
    "Tennis",
    "Track & Field",
    "Volleyball",
    "Water Polo",
    "Wrestling",
    "Cheerleading",
    "Gymnastics",
    "Skiing",
    "Snowboarding",
];

const COLLEGE_SPORTS: &[&str] = &[
    "American Football",
    "Baseball",
    "Basketball",
    "Bowling",
    "Cross Country",
    "Field Hockey",
    "Golf",
    "Gymnastics",
    "Ice Hockey",
    "Lacrosse",
    "Rowing",
    "Rugby",
    "Soccer",
    "Softball",
    "Swimming & Diving",
    "Tennis",
    "Track & Field",
    "Volleyball",
    "Water Polo",
    "Wrestling",
    "Equestrian",
    "Skiing",
    "Snowboarding",
    "Beach Volleyball",
    "Badminton",
    "Squash",
    "Handball",
];

const POSITION_TABLE: &[(&str, &[&str])] = &[
    (
        "american_football",
        &[
            "Quarterback",
            "Running Back",
            "Wide Receiver",
            "Tight End",
            "Offensive Lineman",
            "Defensive Lineman",
            "Linebacker",
            "Defensive Back",
            "Punter",
            "Kicker",
        ],
    ),
    (
        "baseball",
        &[
            "Pitcher",
            "Catcher",
            "Infielder",
            "Outfielder",
            "Designated Hitter",
        ],
    ),
    (
        "basketball",
        &[
            "Point Guard",
            "Shooting Guard",
            "Small Forward",
            "Power Forward",
            "Center",
        ],
    ),
    ("soccer", &["Goalkeeper", "Defender", "Midfielder", "Forward"]),
    (
        "volleyball",
        &[
            "Outside Hitter",
            "Opposite",
            "Middle Blocker",
            "Setter",
            "Libero",
        ],
    ),
    (
        "lacrosse",
        &[
            "Goalie",
            "Attack",
            "Midfield",
            "Defense",
            "Long Stick Midfielder",
        ],
    ),
    ("hockey", &["Goaltender", "Defenseman", "Forward"]),
    (
        "wrestling",
        &[
            "Heavyweight",
            "Light Heavyweight",
            "Middleweight",
            "Lightweight",
            "Flyweight",
        ],
    ),
];

fn sorted(sports: &[&'static str]) -> Vec<&'static str> {
    let mut sports = sports.to_vec();
    sports.sort_unstable();
    sports
}

lazy_static! {
    /// Every sport known to any level, sorted and deduplicated.
    pub static ref ALL_SPORTS: Vec<&'static str> = HIGH_SCHOOL_SPORTS
        .iter()
        .chain(COLLEGE_SPORTS)
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    pub static ref SPORTS_BY_LEVEL: HashMap<Level, Vec<&'static str>> = {
        let mut map = HashMap::new();
        map.insert(Level::HighSchool, sorted(HIGH_SCHOOL_SPORTS));
        map.insert(Level::College, sorted(COLLEGE_SPORTS));
        map.insert(Level::Academy, sorted(COLLEGE_SPORTS));
        map.insert(Level::SemiPro, ALL_SPORTS.clone());
        map
    };

    pub static ref POSITIONS: HashMap<&'static str, &'static [&'static str]> =
        POSITION_TABLE.iter().copied().collect();
}

/// Key under which a sport's positions are stored: lower-cased, whitespace runs
/// collapsed into a single underscore.
pub fn sport_key(sport: &str) -> String {
    sport
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

pub fn sports_for_level(level: Level) -> &'static [&'static str] {
    SPORTS_BY_LEVEL
        .get(&level)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Positions for a sport; empty when the sport has no position vocabulary.
pub fn positions_for_sport(sport: &str) -> &'static [&'static str] {
    POSITIONS
        .get(sport_key(sport).as_str())
        .copied()
        .unwrap_or_default()
}

pub fn is_valid_sport(level: Level, sport: &str) -> bool {
    sports_for_level(level).contains(&sport)
}

pub fn is_valid_position(sport: &str, position: &str) -> bool {
    positions_for_sport(sport).contains(&position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_lists_are_sorted() {
        for level in Level::ALL {
            let sports = sports_for_level(level);
            assert!(!sports.is_empty());
            assert!(sports.windows(2).all(|w| w[0] <= w[1]), "{level} not sorted");
        }
    }

    #[test]
    fn test_academy_mirrors_college() {
        assert_eq!(
            sports_for_level(Level::Academy),
            sports_for_level(Level::College)
        );
    }

    #[test]
    fn test_semi_pro_is_union_without_duplicates() {
        let semi_pro = sports_for_level(Level::SemiPro);
        assert!(semi_pro.contains(&"Cheerleading"));
        assert!(semi_pro.contains(&"Rugby"));
        assert_eq!(
            semi_pro.iter().filter(|s| **s == "Soccer").count(),
            1
        );
    }

    #[test]
    fn test_level_constrains_sport() {
        assert!(is_valid_sport(Level::College, "Rowing"));
        assert!(!is_valid_sport(Level::HighSchool, "Rowing"));
        assert!(is_valid_sport(Level::HighSchool, "Cheerleading"));
        assert!(!is_valid_sport(Level::College, "Cheerleading"));
    }

    #[test]
    fn test_positions_keyed_by_normalized_sport() {
        assert_eq!(sport_key("American  Football"), "american_football");
        assert!(is_valid_position("American Football", "Quarterback"));
        assert!(is_valid_position("Soccer", "Goalkeeper"));
        assert!(!is_valid_position("Soccer", "Pitcher"));
        assert!(positions_for_sport("Golf").is_empty());
    }
}
