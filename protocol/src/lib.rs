//! Wire types for the completion/reward service hosts submit game progress
//! to. Deliberately free of any engine dependency so shells and backends
//! can share it.

use serde::{Deserialize, Serialize};

/// Payload submitted when a single level finishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelCompletion {
    pub game_id: String,
    pub level_number: u8,
    pub level_score: u32,
    pub max_level_score: u32,
    pub coins_for_level: u32,
}

/// Payload submitted once when a whole session completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCompletion {
    pub game_id: String,
    pub game_type: String,
    pub score: u32,
    pub max_score: u32,
    pub levels_completed: u8,
    pub total_levels: u8,
    pub is_full_completion: bool,
}

/// Service acknowledgement. Senders consume nothing from it beyond the
/// optional coin count shown to the learner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionAck {
    pub success: bool,
    #[serde(default)]
    pub coins_earned: u32,
}

impl LevelCompletion {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameCompletion {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl CompletionAck {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
