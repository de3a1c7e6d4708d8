use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use haven_core::{db_path_from_env_value, CoreConfig, ShelterService, Store};

/// Main entry point for the Haven application.
///
/// Starts the REST server that backs the shelter dashboard: referral intake,
/// bed tracking, derived facility summaries, statistics, and the activity
/// feed. Swagger UI is served at `/swagger-ui`.
///
/// # Environment Variables
/// - `HAVEN_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HAVEN_DB_PATH`: SQLite database file (default: "data/shelter.db")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("haven_run=info".parse()?)
                .add_directive("haven_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("HAVEN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = CoreConfig::new(db_path_from_env_value(std::env::var("HAVEN_DB_PATH").ok()));

    if let Some(parent) = cfg.db_path().parent().filter(|p| *p != Path::new("")) {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("++ Starting Haven REST on {}", rest_addr);
    tracing::info!("++ Using database at {}", cfg.db_path().display());

    let store = Arc::new(Store::open(cfg.db_path())?);
    let app = router(AppState {
        service: ShelterService::new(store),
    });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
