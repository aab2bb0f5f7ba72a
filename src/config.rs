use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_CHAT_DELAY_MS: u64 = 1000;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub chat_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            chat_delay: Duration::from_millis(DEFAULT_CHAT_DELAY_MS),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut settings = Settings::default();

        if let Some(url) = lookup("SUPPORT_API_URL") {
            settings.api_url = url;
        }

        if let Some(raw) = lookup("SUPPORT_CHAT_DELAY_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("SUPPORT_CHAT_DELAY_MS must be milliseconds, got {raw:?}"))?;
            settings.chat_delay = Duration::from_millis(millis);
        }

        settings.api_url = settings.api_url.trim_end_matches('/').to_string();
        Ok(settings)
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

/// Installs the settings for the rest of the process. Later calls are ignored.
pub fn install(settings: Settings) -> &'static Settings {
    SETTINGS.get_or_init(|| settings)
}
