//! Translation of directory filters into a query description.
//!
//! A [`SearchQuery`] is the conjunction of the predicates implied by the
//! supplied filters, a sort key and a fixed-size window. It can be pushed into
//! a `sqlx::QueryBuilder` or evaluated against rows already in memory; both
//! paths share the same semantics.

use std::cmp::Ordering;

use sqlx::{Postgres, QueryBuilder};

use crate::dto::common::PAGE_SIZE;
use crate::dto::search::{SearchFilters, SortBy};
use crate::models::{AthleteProfile, Level};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    CityContains(String),
    SportEquals(String),
    LevelEquals(Level),
    AgeAtLeast(i32),
    AgeAtMost(i32),
    PositionEquals(String),
    VerifiedOnly,
}

impl Predicate {
    pub fn matches(&self, profile: &AthleteProfile) -> bool {
        match self {
            Self::CityContains(city) => profile
                .city
                .to_lowercase()
                .contains(&city.to_lowercase()),
            Self::SportEquals(sport) => &profile.sport == sport,
            Self::LevelEquals(level) => profile.level == *level,
            Self::AgeAtLeast(min) => profile.age >= *min,
            Self::AgeAtMost(max) => profile.age <= *max,
            Self::PositionEquals(position) => profile.position.as_ref() == Some(position),
            Self::VerifiedOnly => profile.is_verified,
        }
    }

    fn push_sql(&self, query: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::CityContains(city) => {
                query.push(" AND city ILIKE ");
                query.push_bind(format!("%{}%", escape_like(city)));
            }
            Self::SportEquals(sport) => {
                query.push(" AND sport = ");
                query.push_bind(sport.clone());
            }
            Self::LevelEquals(level) => {
                query.push(" AND level = ");
                query.push_bind(*level);
            }
            Self::AgeAtLeast(min) => {
                query.push(" AND age >= ");
                query.push_bind(*min);
            }
            Self::AgeAtMost(max) => {
                query.push(" AND age <= ");
                query.push_bind(*max);
            }
            Self::PositionEquals(position) => {
                query.push(" AND position = ");
                query.push_bind(position.clone());
            }
            Self::VerifiedOnly => {
                query.push(" AND is_verified = TRUE");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAtDesc,
    AgeAsc,
}

impl SortKey {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::CreatedAtDesc => "created_at DESC, id",
            Self::AgeAsc => "age ASC, id",
        }
    }

    pub fn compare(&self, a: &AthleteProfile, b: &AthleteProfile) -> Ordering {
        let primary = match self {
            Self::CreatedAtDesc => b.created_at.cmp(&a.created_at),
            Self::AgeAsc => a.age.cmp(&b.age),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl From<SortBy> for SortKey {
    fn from(sort_by: SortBy) -> Self {
        match sort_by {
            SortBy::Newest => Self::CreatedAtDesc,
            SortBy::Age => Self::AgeAsc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

impl Window {
    /// Window for a 1-based page number. Pages below 1 are the caller's concern.
    pub fn for_page(page: u32) -> Self {
        let limit = i64::from(PAGE_SIZE);
        Self {
            offset: (i64::from(page) - 1) * limit,
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub predicates: Vec<Predicate>,
    pub sort: SortKey,
    pub window: Window,
}

impl SearchQuery {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        let mut predicates = Vec::new();

        if let Some(city) = non_empty(&filters.city) {
            predicates.push(Predicate::CityContains(city.to_string()));
        }
        if let Some(sport) = non_empty(&filters.sport) {
            predicates.push(Predicate::SportEquals(sport.to_string()));
        }
        if let Some(level) = filters.level {
            predicates.push(Predicate::LevelEquals(level));
        }
        if let Some(min) = filters.age_min {
            predicates.push(Predicate::AgeAtLeast(min));
        }
        if let Some(max) = filters.age_max {
            predicates.push(Predicate::AgeAtMost(max));
        }
        if let Some(position) = non_empty(&filters.position) {
            predicates.push(Predicate::PositionEquals(position.to_string()));
        }
        if filters.verified {
            predicates.push(Predicate::VerifiedOnly);
        }

        Self {
            predicates,
            sort: filters.sort_by.into(),
            window: Window::for_page(filters.page),
        }
    }

    pub fn matches(&self, profile: &AthleteProfile) -> bool {
        self.predicates.iter().all(|p| p.matches(profile))
    }

    /// Appends the predicates as `AND` clauses; the builder must already end
    /// in a `WHERE` clause (e.g. `WHERE 1=1`).
    pub fn push_predicates(&self, query: &mut QueryBuilder<'_, Postgres>) {
        for predicate in &self.predicates {
            predicate.push_sql(query);
        }
    }

    pub fn push_order_and_window(&self, query: &mut QueryBuilder<'_, Postgres>) {
        query.push(" ORDER BY ");
        query.push(self.sort.as_sql());
        query.push(" LIMIT ");
        query.push_bind(self.window.limit);
        query.push(" OFFSET ");
        query.push_bind(self.window.offset);
    }

    /// Runs the query over in-memory rows: the matching window, sorted, and
    /// the total number of matches.
    pub fn apply<'a>(&self, rows: &'a [AthleteProfile]) -> (Vec<&'a AthleteProfile>, i64) {
        let mut matching: Vec<&AthleteProfile> = rows.iter().filter(|p| self.matches(p)).collect();
        let total = matching.len() as i64;

        matching.sort_by(|a, b| self.sort.compare(a, b));

        let page = matching
            .into_iter()
            .skip(self.window.offset.max(0) as usize)
            .take(self.window.limit as usize)
            .collect();

        (page, total)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn athlete(name: &str, age: i32, level: Level, sport: &str, minutes_ago: i64) -> AthleteProfile {
        let created = Utc::now().naive_utc() - Duration::minutes(minutes_ago);
        AthleteProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            age,
            city: "San Diego".to_string(),
            country: "USA".to_string(),
            sport: sport.to_string(),
            position: None,
            level,
            height: None,
            weight: None,
            graduation_year: None,
            highlights_url: None,
            bio: None,
            photo_url: None,
            phone: None,
            is_verified: false,
            contact_email_visible: false,
            contact_phone_visible: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_empty_filters_impose_no_predicates() {
        let query = SearchQuery::from_filters(&SearchFilters::default());
        assert!(query.predicates.is_empty());
        assert_eq!(query.sort, SortKey::CreatedAtDesc);
        assert_eq!(query.window, Window { offset: 0, limit: 20 });
    }

    #[test]
    fn test_predicates_are_exactly_the_supplied_fields() {
        let filters = SearchFilters {
            city: Some("diego".to_string()),
            sport: Some(String::new()),
            level: Some(Level::College),
            age_max: Some(21),
            verified: true,
            ..Default::default()
        };
        let query = SearchQuery::from_filters(&filters);

        assert_eq!(
            query.predicates,
            vec![
                Predicate::CityContains("diego".to_string()),
                Predicate::LevelEquals(Level::College),
                Predicate::AgeAtMost(21),
                Predicate::VerifiedOnly,
            ]
        );
    }

    #[test]
    fn test_window_follows_page() {
        assert_eq!(Window::for_page(1), Window { offset: 0, limit: 20 });
        assert_eq!(Window::for_page(3), Window { offset: 40, limit: 20 });
    }

    #[test]
    fn test_city_match_is_case_insensitive_substring() {
        let profile = athlete("A", 17, Level::College, "Soccer", 0);
        assert!(Predicate::CityContains("DIEGO".to_string()).matches(&profile));
        assert!(Predicate::CityContains("san d".to_string()).matches(&profile));
        assert!(!Predicate::CityContains("austin".to_string()).matches(&profile));
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let profile = athlete("A", 16, Level::College, "Soccer", 0);
        assert!(Predicate::AgeAtLeast(16).matches(&profile));
        assert!(Predicate::AgeAtMost(16).matches(&profile));
        assert!(!Predicate::AgeAtLeast(17).matches(&profile));
    }

    #[test]
    fn test_omitted_field_never_excludes_rows() {
        let rows = vec![
            athlete("A", 17, Level::College, "Soccer", 2),
            athlete("B", 18, Level::College, "Basketball", 1),
        ];
        let with_sport = SearchQuery::from_filters(&SearchFilters {
            level: Some(Level::College),
            sport: Some("Soccer".to_string()),
            ..Default::default()
        });
        let without_sport = SearchQuery::from_filters(&SearchFilters {
            level: Some(Level::College),
            ..Default::default()
        });

        let (narrow, _) = with_sport.apply(&rows);
        let (wide, total) = without_sport.apply(&rows);

        assert_eq!(total, 2);
        assert!(narrow.iter().all(|p| wide.iter().any(|w| w.id == p.id)));
    }

    #[test]
    fn test_college_soccer_age_scenario() {
        let rows = vec![
            athlete("Older", 22, Level::College, "Soccer", 1),
            athlete("Match", 17, Level::College, "Soccer", 5),
        ];
        let filters = SearchFilters {
            level: Some(Level::College),
            sport: Some("Soccer".to_string()),
            age_min: Some(16),
            age_max: Some(19),
            sort_by: SortBy::Age,
            ..Default::default()
        };
        let query = SearchQuery::from_filters(&filters);
        let (page, total) = query.apply(&rows);

        assert_eq!(total, 1);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Match");
        assert_eq!(crate::dto::common::total_pages(total, PAGE_SIZE), 1);
    }

    #[test]
    fn test_sorting_newest_first_and_by_age() {
        let rows = vec![
            athlete("Old", 15, Level::HighSchool, "Golf", 30),
            athlete("New", 19, Level::HighSchool, "Golf", 1),
            athlete("Mid", 12, Level::HighSchool, "Golf", 10),
        ];

        let newest = SearchQuery::from_filters(&SearchFilters::default());
        let names: Vec<_> = newest.apply(&rows).0.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["New", "Mid", "Old"]);

        let by_age = SearchQuery::from_filters(&SearchFilters {
            sort_by: SortBy::Age,
            ..Default::default()
        });
        let ages: Vec<_> = by_age.apply(&rows).0.iter().map(|p| p.age).collect();
        assert_eq!(ages, [12, 15, 19]);
    }

    #[test]
    fn test_apply_slices_the_requested_page() {
        let rows: Vec<_> = (0..45)
            .map(|i| athlete(&format!("A{i}"), 10 + i, Level::SemiPro, "Rugby", 0))
            .collect();
        let query = SearchQuery::from_filters(&SearchFilters {
            sort_by: SortBy::Age,
            page: 3,
            ..Default::default()
        });
        let (page, total) = query.apply(&rows);

        assert_eq!(total, 45);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].age, 50);
    }

    #[test]
    fn test_sql_binds_every_predicate() {
        let filters = SearchFilters {
            city: Some("50%_off".to_string()),
            position: Some("Forward".to_string()),
            age_min: Some(16),
            verified: true,
            ..Default::default()
        };
        let query = SearchQuery::from_filters(&filters);
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM athlete_profiles WHERE 1=1");
        query.push_predicates(&mut builder);
        query.push_order_and_window(&mut builder);

        assert_eq!(
            builder.sql(),
            "SELECT * FROM athlete_profiles WHERE 1=1 AND city ILIKE $1 AND age >= $2 \
             AND position = $3 AND is_verified = TRUE ORDER BY created_at DESC, id LIMIT $4 OFFSET $5"
        );
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
