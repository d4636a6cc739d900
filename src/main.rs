use anyhow::Context;

use snake_server::{config::ServerConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env file when present
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .init();

    println!("🐍 Snake game server starting...");

    // The registry lives for the whole process and is shared by every handler
    let state = AppState::new();
    println!("🔗 Game registry initialized");

    let app = routes::router(state);

    let addr = config.bind_address();
    println!("🚀 Server starting on {} ({})", addr, config.environment);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("✅ Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    println!("👋 Shutting down game server...");
    Ok(())
}
