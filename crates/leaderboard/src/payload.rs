use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Wire model of the Advent of Code private leaderboard JSON, field names
/// exactly as served by `/{year}/leaderboard/private/view/{board}.json`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LeaderboardPayload {
    pub event: String,
    pub owner_id: u64,
    pub members: HashMap<String, MemberPayload>,
}

impl LeaderboardPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MemberPayload {
    pub name: Option<String>,
    pub id: u64,
    #[serde(rename = "stars")]
    pub star_count: u32,
    pub local_score: i64,
    pub global_score: i64,
    #[serde(default)]
    pub last_star_ts: i64,
    #[serde(rename = "completion_day_level", default)]
    pub completion: HashMap<String, HashMap<String, StarPayload>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct StarPayload {
    #[serde(rename = "get_star_ts")]
    pub star_ts: i64,
    pub star_index: i64,
}
