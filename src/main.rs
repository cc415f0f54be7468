use anyhow::{bail, Result};
use tracing::{info, warn};
use workspace_dashboard::config::Config;
use workspace_dashboard::i18n::{Catalogs, CatalogValidator};
use workspace_dashboard::pages;
use workspace_dashboard::remote::RemoteClient;
use workspace_dashboard::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workspace_dashboard=info".parse()?),
        )
        .init();

    info!("Starting workspace dashboard");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Environment: {}, default locale: {}",
        config.environment,
        config.default_locale.code()
    );

    // Catalogs: directory override or the ones compiled in
    let catalogs = match &config.locales_dir {
        Some(dir) => Catalogs::load_dir(dir)?,
        None => Catalogs::embedded()?,
    };

    let report = CatalogValidator::validate(&catalogs, &pages::required_keys());
    for warning in &report.warnings {
        warn!("Catalog: {}", warning);
    }
    if report.has_errors() {
        for error in &report.errors {
            tracing::error!("Catalog: {}", error);
        }
        bail!("{} catalog error(s), refusing to start", report.errors.len());
    }
    info!("Catalogs validated for {} locale(s)", catalogs.locales().len());

    let client = RemoteClient::new(&config.api_url, config.api_token.as_deref())?;
    info!("Remote API: {}", client.base_url());

    server::serve(AppState::new(config, catalogs, client)).await
}
