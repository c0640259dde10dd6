pub mod diff;
pub mod error;
pub mod payload;
pub mod ranking;
pub mod scoring;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil;

pub use diff::{StarEvent, diff};
pub use error::{LeaderboardError, Result};
pub use payload::LeaderboardPayload;
pub use ranking::{DisplayRow, Layout, Page, RankLabel, StarState, rank};
pub use scoring::Scoring;
pub use snapshot::{DAYS, Member, PARTS, Snapshot, Star};
