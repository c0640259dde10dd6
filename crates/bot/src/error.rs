use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Leaderboard error: {0}")]
    LeaderboardError(#[from] leaderboard::LeaderboardError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
