use async_trait::async_trait;
use leaderboard::StarEvent;
use serde_json::json;

use crate::error::Result;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &StarEvent) -> Result<()>;
}

pub fn format_message(event: &StarEvent) -> String {
    let name = match &event.name {
        Some(name) => name.clone(),
        None => format!("anonymous user #{}", event.member_id),
    };
    let star = if event.part == 2 { "🌟" } else { "⭐" };
    format!(
        "{name} has completed Day {day} Part {part}! {star}",
        day = event.day,
        part = event.part
    )
}

/// Delivers star announcements to a chat webhook, one message per event.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &StarEvent) -> Result<()> {
        let body = json!({ "content": format_message(event) });
        self.client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
