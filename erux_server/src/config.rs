use std::{env, path::PathBuf, str::FromStr, time::Duration};

use erux_core::assistant::{ProviderKind, ProviderSettings};
use erux_core::assistant::provider::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_MODEL, DEFAULT_TIMEOUT,
};

pub const DEFAULT_SERVER_DOMAIN: &str = "localhost:3000";
pub const DEFAULT_FEED_INTERVAL: Duration = Duration::from_secs(8);
pub const DEFAULT_OUTBOX_DIR: &str = "reports_outbox";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_domain: String,
    pub feed_interval: Duration,
    pub feed_seed: Option<u64>,
    pub provider: ProviderSettings,
    pub outbox_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let feed_interval = parsed_var::<u64>("FEED_INTERVAL_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FEED_INTERVAL);

        let kind = env::var("ASSISTANT_PROVIDER")
            .ok()
            .and_then(|value| match value.parse::<ProviderKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    log::warn!("{}, falling back to gemini", e);
                    None
                }
            })
            .unwrap_or_default();

        let timeout = parsed_var::<u64>("ASSISTANT_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            server_domain: env::var("SERVER_DOMAIN").unwrap_or(DEFAULT_SERVER_DOMAIN.to_string()),
            feed_interval,
            feed_seed: parsed_var::<u64>("FEED_SEED"),
            provider: ProviderSettings {
                kind,
                gemini_model: env::var("GEMINI_MODEL").unwrap_or(DEFAULT_GEMINI_MODEL.to_string()),
                gemini_base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL.to_string()),
                openai_model: env::var("OPENAI_MODEL").unwrap_or(DEFAULT_OPENAI_MODEL.to_string()),
                timeout,
            },
            outbox_dir: env::var("REPORT_OUTBOX_DIR")
                .map(PathBuf::from)
                .unwrap_or(PathBuf::from(DEFAULT_OUTBOX_DIR)),
        }
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {}={}", name, raw);
            None
        }
    }
}
