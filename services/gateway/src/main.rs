use anyhow::Context;
use gateway::config::GatewayConfig;
use gateway::router::create_router;
use gateway::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting match ledger gateway");

    let config = GatewayConfig::from_env().context("loading configuration")?;

    // Backend is fixed for the lifetime of the process
    let store = persistence::probe(&config.store).await;

    let state = AppState::new(store, config.session_secret.as_deref());
    if !state.sessions.is_configured() {
        tracing::warn!("SESSION_SECRET is not set; all writes will be refused");
    }

    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
