use anyhow::{Context, Result};
use leaderboard::Scoring;
use std::path::PathBuf;

const DEFAULT_USER_AGENT: &str = "aoc-leaderboard-bot/0.1";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 900;
const DEFAULT_LEADERBOARD_SIZE: usize = 20;
const DEFAULT_PAGE_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub year: i32,
    pub board: String,
    pub session: String,
    pub user_agent: String,
    /// Destination for star announcements; no notifications when unset.
    pub webhook_url: Option<String>,
    pub poll_interval_secs: u64,
    pub output_dir: PathBuf,
    pub scoring: Scoring,
    pub size: usize,
    pub page_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            year: std::env::var("AOC_YEAR")
                .context("Cannot load AOC_YEAR env variable")?
                .parse()
                .context("AOC_YEAR must be a year")?,
            board: std::env::var("AOC_BOARD").context("Cannot load AOC_BOARD env variable")?,
            session: std::env::var("AOC_SESSION")
                .context("Cannot load AOC_SESSION env variable")?,
            user_agent: std::env::var("AOC_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            webhook_url: std::env::var("WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            poll_interval_secs: match std::env::var("POLL_INTERVAL_SECS") {
                Ok(v) => v.parse().context("POLL_INTERVAL_SECS must be a number")?,
                Err(_) => DEFAULT_POLL_INTERVAL_SECS,
            },
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            scoring: match std::env::var("SCORING") {
                Ok(v) => v.parse().context("Invalid SCORING value")?,
                Err(_) => Scoring::DayBased,
            },
            size: match std::env::var("LEADERBOARD_SIZE") {
                Ok(v) => v.parse().context("LEADERBOARD_SIZE must be a number")?,
                Err(_) => DEFAULT_LEADERBOARD_SIZE,
            },
            page_capacity: match std::env::var("PAGE_CAPACITY") {
                Ok(v) => v.parse().context("PAGE_CAPACITY must be a number")?,
                Err(_) => DEFAULT_PAGE_CAPACITY,
            },
        })
    }
}
