use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};

use crate::models::Level;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Age,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Age => "age",
        }
    }

    /// Anything other than `age` sorts by newest.
    pub fn from_param(value: &str) -> Self {
        if value.trim() == "age" {
            Self::Age
        } else {
            Self::Newest
        }
    }
}

/// Directory search filters as they travel in the query string.
///
/// Every field is optional; a missing or blank value imposes no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SearchFilters {
    /// Case-insensitive substring of the city
    #[serde(default, deserialize_with = "empty_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sport: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<Level>)]
    pub level: Option<Level>,
    /// Inclusive lower age bound
    #[serde(default, deserialize_with = "empty_as_none")]
    pub age_min: Option<i32>,
    /// Inclusive upper age bound
    #[serde(default, deserialize_with = "empty_as_none")]
    pub age_max: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub position: Option<String>,
    /// Only `true` restricts to verified profiles
    #[serde(default, deserialize_with = "verified_flag")]
    #[param(value_type = Option<bool>)]
    pub verified: bool,
    #[serde(default, deserialize_with = "sort_param")]
    #[param(value_type = Option<SortBy>)]
    pub sort_by: SortBy,
    /// 1-based; blank means the first page
    #[serde(default = "default_page", deserialize_with = "page_param")]
    #[param(value_type = Option<u32>)]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            city: None,
            sport: None,
            level: None,
            age_min: None,
            age_max: None,
            position: None,
            verified: false,
            sort_by: SortBy::Newest,
            page: default_page(),
        }
    }
}

impl SearchFilters {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        Ok(())
    }

    /// Trims the text filters and turns blank ones into `None`.
    pub fn normalized(self) -> Self {
        Self {
            city: non_blank(self.city),
            sport: non_blank(self.sport),
            position: non_blank(self.position),
            ..self
        }
    }

    /// Same filters pointed at another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn page_param<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default_page()),
        Some(value) => value.parse().map_err(de::Error::custom),
    }
}

fn verified_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim) == Some("true"))
}

fn sort_param<'de, D>(deserializer: D) -> Result<SortBy, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(SortBy::from_param).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> SearchFilters {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let filters = parse(serde_json::json!({}));
        assert_eq!(filters, SearchFilters::default());
        assert_eq!(filters.page, 1);
        assert_eq!(filters.sort_by, SortBy::Newest);
    }

    #[test]
    fn test_blank_values_are_treated_as_absent() {
        let filters = parse(serde_json::json!({
            "city": "  ",
            "sport": "",
            "ageMin": "",
            "level": ""
        }));
        assert_eq!(filters.city, None);
        assert_eq!(filters.sport, None);
        assert_eq!(filters.age_min, None);
        assert_eq!(filters.level, None);
    }

    #[test]
    fn test_query_values_are_parsed() {
        let filters = parse(serde_json::json!({
            "city": "Austin",
            "level": "semi_pro",
            "ageMin": "16",
            "ageMax": "19",
            "verified": "true",
            "sortBy": "age",
            "page": "3"
        }));
        assert_eq!(filters.city.as_deref(), Some("Austin"));
        assert_eq!(filters.level, Some(Level::SemiPro));
        assert_eq!(filters.age_min, Some(16));
        assert_eq!(filters.age_max, Some(19));
        assert!(filters.verified);
        assert_eq!(filters.sort_by, SortBy::Age);
        assert_eq!(filters.page, 3);
    }

    #[test]
    fn test_blank_page_means_first_page() {
        assert_eq!(parse(serde_json::json!({"page": ""})).page, 1);
        assert_eq!(parse(serde_json::json!({"page": " 2 "})).page, 2);

        let result: Result<SearchFilters, _> =
            serde_json::from_value(serde_json::json!({"page": "two"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_normalized_trims_text_filters() {
        let filters = SearchFilters {
            city: Some(" Austin ".to_string()),
            sport: Some("".to_string()),
            position: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(filters.city.as_deref(), Some("Austin"));
        assert_eq!(filters.sport, None);
        assert_eq!(filters.position, None);
    }

    #[test]
    fn test_only_literal_true_enables_verified() {
        assert!(!parse(serde_json::json!({"verified": "false"})).verified);
        assert!(!parse(serde_json::json!({"verified": "yes"})).verified);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        let filters = parse(serde_json::json!({"sortBy": "rating"}));
        assert_eq!(filters.sort_by, SortBy::Newest);
    }

    #[test]
    fn test_invalid_age_is_rejected() {
        let result: Result<SearchFilters, _> =
            serde_json::from_value(serde_json::json!({"ageMin": "young"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_page_zero_fails_validation() {
        let filters = SearchFilters {
            page: 0,
            ..Default::default()
        };
        assert!(filters.validate().is_err());
        assert!(SearchFilters::default().validate().is_ok());
    }
}
