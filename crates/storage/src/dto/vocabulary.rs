use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Level;
use crate::vocabulary::{self, DEFAULT_POSITION};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LevelOption {
    pub value: Level,
    pub label: String,
}

/// Everything a form needs to offer the controlled vocabularies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VocabularyResponse {
    pub levels: Vec<LevelOption>,
    pub sports_by_level: BTreeMap<String, Vec<String>>,
    pub positions: BTreeMap<String, Vec<String>>,
    pub default_position: String,
}

impl VocabularyResponse {
    pub fn build() -> Self {
        let levels = Level::ALL
            .into_iter()
            .map(|level| LevelOption {
                value: level,
                label: level.label().to_string(),
            })
            .collect();

        let sports_by_level = Level::ALL
            .into_iter()
            .map(|level| {
                let sports = vocabulary::sports_for_level(level)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                (level.as_str().to_string(), sports)
            })
            .collect();

        let positions = vocabulary::POSITIONS
            .iter()
            .map(|(sport, positions)| {
                (
                    sport.to_string(),
                    positions.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect();

        Self {
            levels,
            sports_by_level,
            positions,
            default_position: DEFAULT_POSITION.to_string(),
        }
    }
}
