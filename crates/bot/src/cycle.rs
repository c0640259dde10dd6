use chrono::Utc;
use leaderboard::{Snapshot, diff, rank};
use std::path::Path;
use std::time::Duration;

use crate::client::AocClient;
use crate::config::Config;
use crate::error::Result;
use crate::notify::Notifier;
use crate::render;

/// The periodic fetch, diff, notify, rank, render pipeline. Only one tick
/// runs at a time; once a snapshot's stars have been announced it becomes
/// the baseline for the next tick, whether or not the page write succeeds.
pub struct UpdateCycle {
    client: AocClient,
    config: Config,
    notifier: Option<Box<dyn Notifier>>,
    previous: Option<Snapshot>,
}

impl UpdateCycle {
    pub fn new(client: AocClient, config: Config, notifier: Option<Box<dyn Notifier>>) -> Self {
        Self {
            client,
            config,
            notifier,
            previous: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let interval = Duration::from_secs(self.config.poll_interval_secs);
        tracing::info!("Polling every {} seconds", self.config.poll_interval_secs);

        loop {
            if let Err(e) = self.tick().await {
                tracing::error!("Update cycle failed: {}", e);
            }
            tokio::time::sleep(interval).await;
        }
    }

    pub async fn tick(&mut self) -> Result<()> {
        let payload = self.client.fetch_leaderboard().await?;
        let snapshot = Snapshot::from_payload(payload, Utc::now());
        self.process(snapshot).await
    }

    async fn process(&mut self, snapshot: Snapshot) -> Result<()> {
        tracing::info!(
            "Fetched snapshot of event {}: {} member(s)",
            snapshot.event,
            snapshot.members.len()
        );

        // First tick has no baseline; announcing the whole board would be
        // noise, so notifications start with the second tick.
        if let Some(previous) = &self.previous {
            let events = diff(previous, &snapshot);
            tracing::info!("{} new star(s) since previous snapshot", events.len());

            if let Some(notifier) = &self.notifier {
                for event in &events {
                    if let Err(e) = notifier.notify(event).await {
                        tracing::error!(
                            member = event.member_id,
                            day = event.day,
                            part = event.part,
                            "Failed to deliver notification: {}",
                            e
                        );
                    }
                }
            }
        }

        let layout = rank(
            &snapshot,
            self.config.scoring,
            self.config.size,
            self.config.page_capacity,
        );
        let pages = render::render_pages(&layout, snapshot.event_year);

        // Retain the snapshot before the fallible page write: a failed
        // write must not leave a stale baseline that replays the
        // announcements above on the next tick.
        self.previous = Some(snapshot);

        write_pages(&self.config.output_dir, &pages).await?;

        Ok(())
    }
}

/// Writes one `leaderboard<i>.html` per page, clearing stale page files
/// first so a shrinking board does not leave orphans behind.
pub async fn write_pages(dir: &Path, pages: &[String]) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    remove_stale_pages(dir).await?;

    for (index, html) in pages.iter().enumerate() {
        let path = dir.join(format!("leaderboard{index}.html"));
        tokio::fs::write(&path, html).await?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}

async fn remove_stale_pages(dir: &Path) -> Result<()> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => return Ok(()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_page = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("leaderboard") && n.ends_with(".html"));
        if is_page {
            tokio::fs::remove_file(&path).await?;
        }
    }

    Ok(())
}
