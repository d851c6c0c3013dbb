use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use citas_core::CoreConfig;

/// Main entry point for the Citas application
///
/// Resolves configuration once, seeds the in-memory store from the configured catalogue and
/// serves the REST API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `CITAS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CITAS_CATALOGUE_FILE`: YAML catalogue; the built-in demo data is used when unset
/// - `CITAS_FILTER_SENTINEL`: filter value meaning "no constraint" (default: "all")
/// - `CITAS_GATEWAY_URL`: persistence backend used by the CLI's `remote` commands
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("citas=info".parse()?)
                .add_directive("citas_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CITAS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env()?;
    tracing::debug!("resolved configuration: {:?}", cfg);

    let state = AppState::from_config(&cfg)?;

    tracing::info!("++ Starting Citas REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
