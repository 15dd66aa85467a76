//! Process configuration read from the environment

use crate::llm::LlmConfig;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Verbose logging, enabled by `APP_ENV=development`
    pub debug: bool,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let debug = lookup("APP_ENV").is_some_and(|env| env == "development");

        Self {
            port,
            debug,
            llm: LlmConfig::from_lookup(lookup),
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "wellness_chat=debug,tower_http=debug"
        } else {
            "wellness_chat=info,tower_http=info"
        }
    }
}
