use anyhow::Result;
use cardio_predict::api::routes::create_routes;
use cardio_predict::{AppConfig, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let address = config.server_address();
    let state = AppState::from_config(config)?;
    info!(
        model = state.model.version(),
        trees = state.model.tree_count(),
        "Heart model loaded"
    );

    let app = create_routes(state);

    let listener = TcpListener::bind(&address).await?;
    info!("CardioPredict server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
