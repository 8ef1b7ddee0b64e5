//! Application configuration loaded from environment variables.

use crate::render::Theme;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8787").
    pub bind_addr: String,

    /// Public origin of this service, used in embed code and share links.
    pub base_url: String,

    /// Site name shown in page titles.
    pub site_name: String,

    /// Redis connection URL. `None` keeps everything in process memory.
    pub redis_url: Option<String>,

    /// Prefix for all Redis keys written by this deployment.
    pub redis_namespace: String,

    /// Keys requested per store listing call.
    pub list_page_size: usize,

    /// Colors handed to the page renderer.
    pub theme: Theme,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `RSVP_BIND_ADDR`: Server bind address (default: "0.0.0.0:8787")
    /// - `RSVP_BASE_URL`: Public origin (default: "http://localhost:8787")
    /// - `RSVP_SITE_NAME`: Site name (default: "rsvp2go")
    /// - `REDIS_URL`: Redis URL; unset means an in-memory store
    /// - `RSVP_REDIS_NAMESPACE`: Redis key prefix (default: "rsvp2go")
    /// - `RSVP_LIST_PAGE_SIZE`: Keys per listing call (default: 1000)
    /// - `RSVP_THEME_BACKGROUND`, `RSVP_THEME_CARD`, `RSVP_THEME_TEXT`,
    ///   `RSVP_THEME_ACCENT`, `RSVP_THEME_INPUT_BG`: CSS colors
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("RSVP_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());

        let base_url = std::env::var("RSVP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8787".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name = std::env::var("RSVP_SITE_NAME").unwrap_or_else(|_| "rsvp2go".to_string());

        let redis_url = std::env::var("REDIS_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let redis_namespace =
            std::env::var("RSVP_REDIS_NAMESPACE").unwrap_or_else(|_| "rsvp2go".to_string());

        let list_page_size = match std::env::var("RSVP_LIST_PAGE_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("RSVP_LIST_PAGE_SIZE must be a positive integer, got '{raw}'")
                })?,
            Err(_) => rsvp2go_core::kv::DEFAULT_PAGE_SIZE,
        };

        let defaults = Theme::default();
        let theme = Theme {
            background: env_or("RSVP_THEME_BACKGROUND", defaults.background),
            card: env_or("RSVP_THEME_CARD", defaults.card),
            text: env_or("RSVP_THEME_TEXT", defaults.text),
            accent: env_or("RSVP_THEME_ACCENT", defaults.accent),
            input_bg: env_or("RSVP_THEME_INPUT_BG", defaults.input_bg),
        };

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            redis = redis_url.is_some(),
            list_page_size,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            redis_url,
            redis_namespace,
            list_page_size,
            theme,
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
