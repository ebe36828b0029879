//! Filters as a shareable query string.
//!
//! The query string uses the same parameter names as `GET /api/athletes`, so a
//! bookmarked location can be replayed against the API unchanged.

use serde_json::{Map, Value};
use storage::dto::search::SearchFilters;

use crate::{ClientError, Result};

pub fn to_query_string(filters: &SearchFilters) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(city) = non_empty(&filters.city) {
        pairs.push(("city", city.to_string()));
    }
    if let Some(sport) = non_empty(&filters.sport) {
        pairs.push(("sport", sport.to_string()));
    }
    if let Some(level) = filters.level {
        pairs.push(("level", level.as_str().to_string()));
    }
    if let Some(min) = filters.age_min {
        pairs.push(("ageMin", min.to_string()));
    }
    if let Some(max) = filters.age_max {
        pairs.push(("ageMax", max.to_string()));
    }
    if let Some(position) = non_empty(&filters.position) {
        pairs.push(("position", position.to_string()));
    }
    if filters.verified {
        pairs.push(("verified", "true".to_string()));
    }
    pairs.push(("sortBy", filters.sort_by.as_str().to_string()));
    pairs.push(("page", filters.page.to_string()));

    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Restore filters from a query string, with or without the leading `?`.
/// Unknown parameters are ignored; missing or blank ones take their defaults.
pub fn from_query_string(query: &str) -> Result<SearchFilters> {
    let mut fields = Map::new();

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        fields.insert(decode(key)?, Value::String(decode(value)?));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ClientError::Location(e.to_string()))
}

fn decode(raw: &str) -> Result<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|value| value.into_owned())
        .map_err(|e| ClientError::Location(e.to_string()))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
