use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use symbiotek::api::{create_router, AppState};
use symbiotek::chat::{OpenAiClient, TextGenerator};
use symbiotek::config::{load_config, SymbiotekConfig};
use symbiotek::simulator::run_simulator;
use symbiotek::store::PlantStore;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symbiotek=info".into()),
        )
        .init();

    info!("Symbiotek starting...");

    let config_path =
        std::env::var("SYMBIOTEK_CONFIG").unwrap_or_else(|_| "symbiotek.toml".to_string());
    let file_config = if Path::new(&config_path).exists() {
        load_config(&config_path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load config from {}", config_path))?
    } else {
        info!(path = %config_path, "Config file not found, using defaults");
        SymbiotekConfig::default()
    };
    let config = file_config.apply_env();

    info!(
        bind_addr = %config.server.bind_addr,
        simulator_enabled = config.simulator.enabled,
        auth_enabled = config.auth.enabled,
        "Configuration loaded"
    );

    if config.chat.api_key.is_none() {
        warn!("OPENAI_API_KEY not set, chat will answer with fallback replies");
    }

    let store = Arc::new(PlantStore::new(config.store.history_limit));
    let chat: Arc<dyn TextGenerator> =
        Arc::new(OpenAiClient::new(&config.chat).context("Failed to create chat client")?);

    if config.simulator.enabled {
        tokio::spawn(run_simulator(
            Arc::clone(&store),
            config.simulator.interval_seconds,
        ));
    }

    let state = Arc::new(AppState::new(Arc::clone(&store), chat, &config));
    info!(users = state.users.len(), "User registry loaded");
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "HTTP server listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "HTTP server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    info!("Symbiotek stopped");

    Ok(())
}
