use std::env;

use tracing::info;

/// Connection inputs the console consumes but does not own: the feed topic
/// and whatever credential the transport layer presents on connect.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub feed_topic: String,
    pub feed_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default; the token stays `None` unless provided.
    pub fn from_env() -> Self {
        Self {
            feed_url: env::var("FEED_URL").unwrap_or_else(|_| "/socket".to_string()),
            feed_topic: env::var("FEED_TOPIC").unwrap_or_else(|_| "c2:all".to_string()),
            feed_token: env::var("FEED_TOKEN").ok(),
        }
    }

    /// Log the effective configuration without leaking the token.
    pub fn log_redacted(&self) {
        info!(
            url = self.feed_url.as_str(),
            topic = self.feed_topic.as_str(),
            token = if self.feed_token.is_some() { "set" } else { "unset" },
            "Feed configuration"
        );
    }
}
