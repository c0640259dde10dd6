use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use leaderboard::{Scoring, Snapshot, rank};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod config;
mod cycle;
mod error;
mod notify;
mod render;

use client::AocClient;
use config::Config;
use cycle::UpdateCycle;
use notify::{Notifier, WebhookNotifier};

#[derive(Parser)]
#[command(name = "aoc-bot")]
#[command(about = "Advent of Code private leaderboard bot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Periodically fetch the board, announce new stars, and render pages
    Run,
    /// Fetch once, render the ranked pages, and exit
    Render {
        #[arg(long)]
        scoring: Option<Scoring>,

        #[arg(long)]
        size: Option<usize>,

        #[arg(long)]
        page_capacity: Option<usize>,

        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("aoc_bot={},leaderboard={}", log_level, log_level).into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load bot configuration")?;
    let client = AocClient::new(
        config.year,
        &config.board,
        &config.session,
        &config.user_agent,
    );

    match cli.command {
        Commands::Run => {
            let notifier: Option<Box<dyn Notifier>> = config
                .webhook_url
                .clone()
                .map(|url| Box::new(WebhookNotifier::new(url)) as Box<dyn Notifier>);
            if notifier.is_none() {
                tracing::info!("WEBHOOK_URL not set, star announcements disabled");
            }

            let mut cycle = UpdateCycle::new(client, config, notifier);
            cycle.run().await?;
            Ok(())
        }
        Commands::Render {
            scoring,
            size,
            page_capacity,
            output,
        } => {
            handle_render(
                &client,
                scoring.unwrap_or(config.scoring),
                size.unwrap_or(config.size),
                page_capacity.unwrap_or(config.page_capacity),
                output.unwrap_or(config.output_dir),
            )
            .await
        }
    }
}

async fn handle_render(
    client: &AocClient,
    scoring: Scoring,
    size: usize,
    page_capacity: usize,
    output: PathBuf,
) -> anyhow::Result<()> {
    tracing::info!("Fetching leaderboard...");
    let payload = client.fetch_leaderboard().await?;
    let snapshot = Snapshot::from_payload(payload, Utc::now());

    let layout = rank(&snapshot, scoring, size, page_capacity);
    if layout.pages.is_empty() {
        tracing::warn!("No members with a positive {} score, nothing to render", scoring);
        return Ok(());
    }

    tracing::info!(
        "Rendering {} row(s) across {} page(s)",
        layout.total_rows,
        layout.pages.len()
    );
    let pages = render::render_pages(&layout, snapshot.event_year);
    cycle::write_pages(&output, &pages).await?;

    Ok(())
}
