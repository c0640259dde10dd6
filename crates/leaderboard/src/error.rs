use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeaderboardError>;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Failed to parse leaderboard JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown scoring policy: {0}")]
    UnknownScoring(String),
}
