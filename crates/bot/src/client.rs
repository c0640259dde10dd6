use leaderboard::LeaderboardPayload;

use crate::error::Result;

pub struct AocClient {
    base_url: String,
    year: i32,
    board: String,
    session: String,
    client: reqwest::Client,
}

impl AocClient {
    pub fn new(year: i32, board: &str, session: &str, user_agent: &str) -> Self {
        Self {
            base_url: "https://adventofcode.com".to_string(),
            year,
            board: board.to_string(),
            session: session.to_string(),
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap(),
        }
    }

    /// Fetches the private leaderboard JSON. An expired session cookie gets
    /// a 200 with the login page instead of JSON, which surfaces here as a
    /// parse error.
    pub async fn fetch_leaderboard(&self) -> Result<LeaderboardPayload> {
        let url = format!(
            "{}/{}/leaderboard/private/view/{}.json",
            self.base_url, self.year, self.board
        );

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::COOKIE, format!("session={}", self.session))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(LeaderboardPayload::from_json(&body)?)
    }
}
