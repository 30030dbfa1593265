use gateway::config::GatewayConfig;
use gateway::router::create_router;
use gateway::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(assets = ?config.assets, "Starting matching gateway");

    let state = AppState::new(&config);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
