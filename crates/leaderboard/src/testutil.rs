use chrono::{DateTime, Utc};

use crate::snapshot::{DAYS, Member, PARTS, Snapshot, Star};

pub(crate) fn member(id: u64, name: Option<&str>) -> Member {
    Member {
        id,
        name: name.map(str::to_string),
        star_count: 0,
        local_score: 0,
        global_score: 0,
        last_star_ts: 0,
        stars: [[None; PARTS]; DAYS],
    }
}

pub(crate) fn give_star(member: &mut Member, day: u32, part: u32, completed_at: DateTime<Utc>) {
    member.stars[(day - 1) as usize][(part - 1) as usize] = Some(Star {
        completed_at,
        index: 0,
    });
    member.star_count += 1;
    member.last_star_ts = completed_at.timestamp();
}

pub(crate) fn snapshot(year: i32, members: Vec<Member>) -> Snapshot {
    Snapshot {
        event: year.to_string(),
        event_year: year,
        owner_id: 1,
        captured_at: Utc::now(),
        members: members.into_iter().map(|m| (m.id, m)).collect(),
    }
}
