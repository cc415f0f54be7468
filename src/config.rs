use crate::i18n::Locale;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Environment (development, production)
    pub environment: String,

    // Server
    pub port: u16,

    // Remote API
    pub api_url: String,
    pub api_token: Option<String>,
    pub query_deadline: Duration,

    // Admin
    pub admin_api_key: Option<String>,

    // Localization
    pub default_locale: Locale,
    pub locales_dir: Option<PathBuf>,

    // Onboarding link shown when the user has no workspaces
    pub create_workspace_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale = std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string());
        let default_locale = Locale::from_code(&default_locale)
            .with_context(|| format!("DEFAULT_LOCALE '{}' is not an enabled locale", default_locale))?;

        Ok(Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Remote API
            api_url: std::env::var("DASHBOARD_API_URL").context("DASHBOARD_API_URL not set")?,
            api_token: non_empty_var("DASHBOARD_API_TOKEN"),
            query_deadline: Duration::from_millis(
                std::env::var("QUERY_DEADLINE_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3000),
            ),

            // Admin
            admin_api_key: non_empty_var("ADMIN_API_KEY"),

            // Localization
            default_locale,
            locales_dir: non_empty_var("LOCALES_DIR").map(PathBuf::from),

            create_workspace_url: std::env::var("CREATE_WORKSPACE_URL")
                .unwrap_or_else(|_| "/workspaces/new".to_string()),
        })
    }
}

/// Unset and empty variables are both treated as absent.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
