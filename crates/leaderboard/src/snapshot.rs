use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use tracing::warn;

use crate::payload::{LeaderboardPayload, MemberPayload};

pub const DAYS: usize = 25;
pub const PARTS: usize = 2;

/// A single completed puzzle part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub completed_at: DateTime<Utc>,
    pub index: i64,
}

/// A leaderboard member with a fixed-size completion grid indexed by
/// (day 1..=25, part 1..=2). An absent slot means the part was not solved.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: u64,
    pub name: Option<String>,
    pub star_count: u32,
    pub local_score: i64,
    pub global_score: i64,
    pub last_star_ts: i64,
    pub stars: [[Option<Star>; PARTS]; DAYS],
}

impl Member {
    pub fn star(&self, day: u32, part: u32) -> Option<&Star> {
        if !(1..=DAYS as u32).contains(&day) || !(1..=PARTS as u32).contains(&part) {
            return None;
        }
        self.stars[(day - 1) as usize][(part - 1) as usize].as_ref()
    }

    fn from_payload(payload: MemberPayload) -> Self {
        let mut stars = [[None; PARTS]; DAYS];

        for (day_key, parts) in &payload.completion {
            let Ok(day @ 1..=25) = day_key.parse::<usize>() else {
                warn!(member = payload.id, day = %day_key, "Skipping completion entry with invalid day");
                continue;
            };
            for (part_key, star) in parts {
                let Ok(part @ 1..=2) = part_key.parse::<usize>() else {
                    warn!(member = payload.id, day, part = %part_key, "Skipping completion entry with invalid part");
                    continue;
                };
                let Some(completed_at) = DateTime::from_timestamp(star.star_ts, 0) else {
                    warn!(member = payload.id, day, part, ts = star.star_ts, "Skipping completion entry with invalid timestamp");
                    continue;
                };
                stars[day - 1][part - 1] = Some(Star {
                    completed_at,
                    index: star.star_index,
                });
            }
        }

        Self {
            id: payload.id,
            name: payload.name,
            star_count: payload.star_count,
            local_score: payload.local_score,
            global_score: payload.global_score,
            last_star_ts: payload.last_star_ts,
            stars,
        }
    }
}

/// Immutable capture of the full leaderboard state at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub event: String,
    pub event_year: i32,
    pub owner_id: u64,
    pub captured_at: DateTime<Utc>,
    pub members: BTreeMap<u64, Member>,
}

impl Snapshot {
    pub fn from_payload(payload: LeaderboardPayload, captured_at: DateTime<Utc>) -> Self {
        let event_year = payload.event.trim().parse().unwrap_or_else(|_| {
            warn!(event = %payload.event, "Event label is not a year, falling back to capture year");
            captured_at.year()
        });

        // Keyed by the member's own id rather than the payload map key, in
        // case the two ever disagree.
        let members = payload
            .members
            .into_values()
            .map(|m| (m.id, Member::from_payload(m)))
            .collect();

        Self {
            event: payload.event,
            event_year,
            owner_id: payload.owner_id,
            captured_at,
            members,
        }
    }
}
