use chrono::{DateTime, Utc};

use crate::snapshot::{DAYS, PARTS, Snapshot};

/// A puzzle part completed in the current snapshot that was not present in
/// the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarEvent {
    pub member_id: u64,
    pub name: Option<String>,
    pub day: u32,
    pub part: u32,
    pub completed_at: DateTime<Utc>,
}

/// Compares two successive snapshots and returns the newly earned stars.
///
/// Only members present in BOTH snapshots produce events; a member joining
/// the board would otherwise flood the channel with their whole history.
/// Detection is by slot presence (and timestamp change), never by comparing
/// timestamps against the current wall clock, so re-running the diff on the
/// same pair is idempotent. Events are ordered by (member id, day, part).
pub fn diff(previous: &Snapshot, current: &Snapshot) -> Vec<StarEvent> {
    let mut events = Vec::new();

    for (id, member) in &current.members {
        let Some(before) = previous.members.get(id) else {
            continue;
        };

        for day in 1..=DAYS as u32 {
            for part in 1..=PARTS as u32 {
                let Some(star) = member.star(day, part) else {
                    continue;
                };
                let is_new = match before.star(day, part) {
                    None => true,
                    Some(old) => old.completed_at != star.completed_at,
                };
                if is_new {
                    events.push(StarEvent {
                        member_id: *id,
                        name: member.name.clone(),
                        day,
                        part,
                        completed_at: star.completed_at,
                    });
                }
            }
        }
    }

    events
}
