use devdishes_core::{
    config::request_timeout_from_env_value, constants::DEFAULT_API_URL, CoreConfig,
    RecipeService,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the DevDishes site.
///
/// Loads the recipe catalog once (seed recipes plus whatever the recipe service returns) and then
/// serves the site API.
///
/// # Environment Variables
/// - `DEVDISHES_API_URL`: base URL of the recipe service (default: "http://localhost:5000")
/// - `DEVDISHES_REST_ADDR`: site API address (default: "0.0.0.0:3000")
/// - `DEVDISHES_SEED_FILE`: YAML file replacing the built-in seed recipes (optional)
/// - `DEVDISHES_REQUEST_TIMEOUT_SECS`: timeout for calls to the recipe service (optional)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the seed catalog cannot be read,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("devdishes=info".parse()?)
                .add_directive("devdishes_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var("DEVDISHES_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
    let rest_addr = std::env::var("DEVDISHES_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let seed_file = std::env::var("DEVDISHES_SEED_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let timeout =
        request_timeout_from_env_value(std::env::var("DEVDISHES_REQUEST_TIMEOUT_SECS").ok())?;

    let cfg = CoreConfig::new(&api_url, seed_file, timeout)?;

    tracing::info!("++ Loading catalog from {}", cfg.api_base_url());
    let service = RecipeService::start(&cfg).await?;
    tracing::info!("++ Catalog ready with {} recipes", service.catalog().len());

    api_rest::serve(&rest_addr, service).await?;

    Ok(())
}
