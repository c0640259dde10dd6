use chrono::{DateTime, TimeZone, Utc};

use crate::error::LeaderboardError;
use crate::snapshot::{DAYS, Member, PARTS};

/// Selectable scoring policy for ranking members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scoring {
    /// The platform-assigned local score.
    Official,
    /// Rewards solving each part promptly relative to its unlock time,
    /// instead of rewarding absolute position among all solvers.
    DayBased,
    /// Plain count of completed parts.
    StarCount,
}

impl Scoring {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::DayBased => "day-based",
            Self::StarCount => "star-count",
        }
    }

    pub fn all() -> &'static [Scoring] {
        &[Self::Official, Self::DayBased, Self::StarCount]
    }

    fn parse_str(s: &str) -> Result<Self, LeaderboardError> {
        let normalized = s.to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "official" | "local" => Ok(Self::Official),
            "day-based" | "daybased" | "friendly" => Ok(Self::DayBased),
            "star-count" | "starcount" | "stars" => Ok(Self::StarCount),
            _ => Err(LeaderboardError::UnknownScoring(format!(
                "'{}'. Available: {}",
                s,
                Self::all()
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl TryFrom<&str> for Scoring {
    type Error = LeaderboardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for Scoring {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Scoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Puzzles unlock at 05:00 UTC on their day of December.
pub fn unlock_instant(year: i32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 12, day, 5, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

impl Member {
    pub fn score(&self, scoring: Scoring, year: i32) -> f64 {
        match scoring {
            Scoring::Official => self.local_score as f64,
            Scoring::StarCount => self.star_count as f64,
            Scoring::DayBased => self.day_based_score(year),
        }
    }

    pub fn format_score(&self, scoring: Scoring, year: i32) -> String {
        match scoring {
            Scoring::Official => self.local_score.to_string(),
            Scoring::StarCount => self.star_count.to_string(),
            Scoring::DayBased => format!("{:.2}", self.day_based_score(year)),
        }
    }

    /// Each completed part contributes `1 / (elapsed_days + 1)`, where
    /// `elapsed_days` is the number of whole days between the part's unlock
    /// instant and its completion: 1.0 for a same-day solve, 0.5 the next
    /// day, and so on. Clamped at zero so a timestamp before the modeled
    /// unlock cannot zero the denominator.
    fn day_based_score(&self, year: i32) -> f64 {
        let mut total = 0.0;
        for day in 1..=DAYS as u32 {
            let unlock = unlock_instant(year, day);
            for part in 1..=PARTS as u32 {
                if let Some(star) = self.star(day, part) {
                    let hours = (star.completed_at - unlock).num_hours();
                    let elapsed_days = hours.div_euclid(24).max(0);
                    total += 1.0 / (elapsed_days + 1) as f64;
                }
            }
        }
        total
    }
}
