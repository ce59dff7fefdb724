/**
 * Chatbox Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads configuration and serves the
 * Axum application.
 */

use chatbox_saas::backend::server::{create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,tower_http=debug".to_string());

    eprintln!("[STARTUP] Setting RUST_LOG={}", env_filter);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    eprintln!("[STARTUP] Tracing initialized");

    let config = ServerConfig::from_env()?;
    let port = config.port;

    let app = create_app(config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("[STARTUP] Listening on {}", addr);
    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
