use std::cmp::Ordering;

use crate::scoring::Scoring;
use crate::snapshot::{DAYS, Member, Snapshot};

/// Visual state of one day's cell in the star grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarState {
    Locked,
    FirstOnly,
    Both,
}

/// Rank cell content. `Hidden` is a fixed-width placeholder rather than an
/// empty cell so the rank column keeps its alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankLabel {
    Position(usize),
    Hidden,
}

#[derive(Debug, Clone)]
pub struct DisplayRow {
    pub member_id: u64,
    pub name: Option<String>,
    pub score: f64,
    pub score_text: String,
    pub rank: RankLabel,
    pub stars: [StarState; DAYS],
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub pages: Vec<Page>,
    /// Rows across all pages, used by the renderer to size the rank
    /// placeholder.
    pub total_rows: usize,
}

/// Ranks a snapshot's members under the given scoring policy and lays them
/// out as fixed-capacity pages.
///
/// Members with a non-finite or non-positive score are never shown. The
/// remainder are sorted by descending score, ties broken by ascending name
/// (anonymous members first), truncated to `requested_size`, and split
/// into `ceil(count / page_capacity)` pages with the surplus rows going to
/// the earliest pages, so the first page is always the fullest.
///
/// A row carries an explicit rank number when it opens its tie group or
/// its page; every page must be readable without the previous one.
pub fn rank(
    snapshot: &Snapshot,
    scoring: Scoring,
    requested_size: usize,
    page_capacity: usize,
) -> Layout {
    let year = snapshot.event_year;

    let mut scored: Vec<(&Member, f64)> = snapshot
        .members
        .values()
        .map(|m| (m, m.score(scoring, year)))
        .filter(|(_, score)| score.is_finite() && *score > 0.0)
        .collect();

    scored.sort_by(|(a, score_a), (b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let count = scored.len().min(requested_size);
    scored.truncate(count);

    if count == 0 || page_capacity == 0 {
        return Layout::default();
    }

    // Index of the first row of each row's tie group; the group's rank is
    // that index plus one.
    let mut group_start = vec![0usize; count];
    for i in 1..count {
        group_start[i] = if scored[i].1 == scored[i - 1].1 {
            group_start[i - 1]
        } else {
            i
        };
    }

    let pages = count.div_ceil(page_capacity);
    let base = count / pages;
    let extra = count % pages;

    let mut layout = Layout {
        pages: Vec::with_capacity(pages),
        total_rows: count,
    };

    let mut index = 0usize;
    for page_number in 0..pages {
        let size = if page_number < extra { base + 1 } else { base };
        let mut page = Page {
            rows: Vec::with_capacity(size),
        };

        for offset in 0..size {
            let (member, score) = scored[index];
            let rank = if group_start[index] == index || offset == 0 {
                RankLabel::Position(group_start[index] + 1)
            } else {
                RankLabel::Hidden
            };

            page.rows.push(DisplayRow {
                member_id: member.id,
                name: member.name.clone(),
                score,
                score_text: member.format_score(scoring, year),
                rank,
                stars: star_states(member),
            });
            index += 1;
        }

        layout.pages.push(page);
    }

    layout
}

fn star_states(member: &Member) -> [StarState; DAYS] {
    let mut states = [StarState::Locked; DAYS];
    for day in 1..=DAYS as u32 {
        states[(day - 1) as usize] = if member.star(day, 2).is_some() {
            StarState::Both
        } else if member.star(day, 1).is_some() {
            StarState::FirstOnly
        } else {
            StarState::Locked
        };
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::unlock_instant;
    use crate::testutil::{give_star, member, snapshot};

    fn starred_member(id: u64, name: &str, stars: u32) -> Member {
        let mut m = member(id, Some(name));
        m.star_count = stars;
        m
    }

    fn rows(layout: &Layout) -> Vec<&DisplayRow> {
        layout.pages.iter().flat_map(|p| p.rows.iter()).collect()
    }

    #[test]
    fn test_zero_score_members_are_excluded() {
        let snap = snapshot(
            2021,
            vec![
                starred_member(1, "Ann", 3),
                starred_member(2, "Bob", 0),
            ],
        );

        let layout = rank(&snap, Scoring::StarCount, 20, 20);
        let rows = rows(&layout);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_id, 1);
    }

    #[test]
    fn test_negative_official_scores_are_excluded() {
        let mut m = member(1, Some("Ann"));
        m.local_score = -5;
        let snap = snapshot(2021, vec![m]);

        let layout = rank(&snap, Scoring::Official, 20, 20);
        assert!(layout.pages.is_empty());
    }

    #[test]
    fn test_empty_snapshot_yields_zero_pages() {
        let snap = snapshot(2021, vec![]);
        let layout = rank(&snap, Scoring::StarCount, 20, 20);
        assert!(layout.pages.is_empty());
        assert_eq!(layout.total_rows, 0);
    }

    #[test]
    fn test_sorted_by_score_then_name() {
        let mut anonymous = member(4, None);
        anonymous.star_count = 5;
        let snap = snapshot(
            2021,
            vec![
                starred_member(1, "Zoe", 5),
                starred_member(2, "Amy", 9),
                starred_member(3, "Bob", 5),
                anonymous,
            ],
        );

        let layout = rank(&snap, Scoring::StarCount, 20, 20);
        let ids: Vec<u64> = rows(&layout).iter().map(|r| r.member_id).collect();
        // Amy first on score; the tied trio sorts anonymous-first, then by name.
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_tie_break_example() {
        let snap = snapshot(
            2021,
            vec![
                starred_member(1, "Ann", 10),
                starred_member(2, "Bob", 10),
                starred_member(3, "Amy", 3),
            ],
        );

        let layout = rank(&snap, Scoring::StarCount, 2, 20);
        let rows = rows(&layout);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("Ann"));
        assert_eq!(rows[0].rank, RankLabel::Position(1));
        assert_eq!(rows[1].name.as_deref(), Some("Bob"));
        assert_eq!(rows[1].rank, RankLabel::Hidden);
    }

    #[test]
    fn test_truncates_to_requested_size() {
        let members = (1..=30)
            .map(|id| starred_member(id, &format!("m{id:02}"), 31 - id as u32))
            .collect();
        let snap = snapshot(2021, members);

        let layout = rank(&snap, Scoring::StarCount, 10, 20);
        assert_eq!(layout.total_rows, 10);
        assert_eq!(rows(&layout).len(), 10);
    }

    #[test]
    fn test_page_distribution_front_loads_the_remainder() {
        let members = (1..=41)
            .map(|id| starred_member(id, &format!("m{id:02}"), 100 - id as u32))
            .collect();
        let snap = snapshot(2021, members);

        let layout = rank(&snap, Scoring::StarCount, 41, 20);
        let sizes: Vec<usize> = layout.pages.iter().map(|p| p.rows.len()).collect();
        assert_eq!(sizes, vec![14, 14, 13]);
        assert_eq!(sizes.iter().sum::<usize>(), 41);
        assert!(sizes.iter().all(|s| *s <= 20));
        assert!(sizes.iter().all(|s| *s <= sizes[0]));
    }

    #[test]
    fn test_exact_multiple_splits_evenly() {
        let members = (1..=40)
            .map(|id| starred_member(id, &format!("m{id:02}"), 100 - id as u32))
            .collect();
        let snap = snapshot(2021, members);

        let layout = rank(&snap, Scoring::StarCount, 40, 20);
        let sizes: Vec<usize> = layout.pages.iter().map(|p| p.rows.len()).collect();
        assert_eq!(sizes, vec![20, 20]);
    }

    #[test]
    fn test_tie_group_shows_rank_only_on_first_row() {
        let members = (1..=5)
            .map(|id| starred_member(id, &format!("m{id}"), 7))
            .collect();
        let snap = snapshot(2021, members);

        let layout = rank(&snap, Scoring::StarCount, 20, 20);
        let rows = rows(&layout);
        assert_eq!(rows[0].rank, RankLabel::Position(1));
        for row in &rows[1..] {
            assert_eq!(row.rank, RankLabel::Hidden);
        }
    }

    #[test]
    fn test_tie_group_rank_reshown_at_page_start() {
        // 25 members all tied: two pages of 13 and 12 rows, and the page
        // break lands mid-group.
        let members = (1..=25)
            .map(|id| starred_member(id, &format!("m{id:02}"), 7))
            .collect();
        let snap = snapshot(2021, members);

        let layout = rank(&snap, Scoring::StarCount, 25, 20);
        assert_eq!(layout.pages.len(), 2);
        assert_eq!(layout.pages[0].rows.len(), 13);
        assert_eq!(layout.pages[1].rows.len(), 12);

        assert_eq!(layout.pages[0].rows[0].rank, RankLabel::Position(1));
        assert_eq!(layout.pages[1].rows[0].rank, RankLabel::Position(1));
        for row in &layout.pages[0].rows[1..] {
            assert_eq!(row.rank, RankLabel::Hidden);
        }
        for row in &layout.pages[1].rows[1..] {
            assert_eq!(row.rank, RankLabel::Hidden);
        }
    }

    #[test]
    fn test_second_tie_group_ranked_after_full_first_group() {
        let snap = snapshot(
            2021,
            vec![
                starred_member(1, "Ann", 9),
                starred_member(2, "Bob", 9),
                starred_member(3, "Cal", 9),
                starred_member(4, "Dee", 4),
            ],
        );

        let layout = rank(&snap, Scoring::StarCount, 20, 20);
        let rows = rows(&layout);
        assert_eq!(rows[0].rank, RankLabel::Position(1));
        assert_eq!(rows[1].rank, RankLabel::Hidden);
        assert_eq!(rows[2].rank, RankLabel::Hidden);
        assert_eq!(rows[3].rank, RankLabel::Position(4));
    }

    #[test]
    fn test_star_grid_states() {
        let mut m = member(1, Some("Ann"));
        let unlock = unlock_instant(2021, 1);
        give_star(&mut m, 1, 1, unlock);
        give_star(&mut m, 1, 2, unlock);
        give_star(&mut m, 2, 1, unlock);
        let snap = snapshot(2021, vec![m]);

        let layout = rank(&snap, Scoring::StarCount, 20, 20);
        let row = &layout.pages[0].rows[0];
        assert_eq!(row.stars[0], StarState::Both);
        assert_eq!(row.stars[1], StarState::FirstOnly);
        for state in &row.stars[2..] {
            assert_eq!(*state, StarState::Locked);
        }
    }

    #[test]
    fn test_rows_carry_formatted_scores() {
        let mut m = member(1, Some("Ann"));
        give_star(&mut m, 1, 1, unlock_instant(2021, 1));
        give_star(&mut m, 1, 2, unlock_instant(2021, 1) + chrono::TimeDelta::days(1));
        let snap = snapshot(2021, vec![m]);

        let layout = rank(&snap, Scoring::DayBased, 20, 20);
        let row = &layout.pages[0].rows[0];
        assert_eq!(row.score, 1.5);
        assert_eq!(row.score_text, "1.50");
    }

    #[test]
    fn test_scores_never_non_positive_in_output() {
        let members = (1..=10)
            .map(|id| starred_member(id, &format!("m{id}"), (id % 3) as u32))
            .collect();
        let snap = snapshot(2021, members);

        for scoring in Scoring::all() {
            let layout = rank(&snap, *scoring, 20, 20);
            for row in rows(&layout) {
                assert!(row.score > 0.0);
            }
        }
    }
}
