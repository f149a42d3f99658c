use anyhow::Result;
use tracing::info;

use polyglot_api::app;
use polyglot_api::config::AppConfig;
use polyglot_api::i18n::LocalizationManager;
use polyglot_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("polyglot_api=info".parse()?),
        )
        .init();

    info!("Starting localized API scaffold");

    // Load configuration from environment
    let config = AppConfig::from_env()?;

    // Construct the localization manager; catalog problems abort startup
    let localization = LocalizationManager::global_with(config.locale_options())?;

    let router = app::build_router(AppState::new(localization));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
