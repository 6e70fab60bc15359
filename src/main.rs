//! Driftcheck Web - Entry Point

use driftcheck_web::{Config, DashboardServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Driftcheck Web v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage: driftcheck-web");
        println!();
        println!("Environment variables:");
        println!("  API_BASE_URL        Backend API base URL (default: http://localhost:8000)");
        println!("  API_TIMEOUT_SECS    Backend request timeout (default: 30)");
        println!("  WEB_BIND_ADDR       Bind address (default: 127.0.0.1)");
        println!("  WEB_PORT            Port (default: 3000)");
        println!("  WEB_SECURE_COOKIES  Mark cookies Secure (default: false)");
        println!("  WEB_LOG_REQUESTS    Log every request (default: true)");
        println!("  WEB_CORS_ORIGINS    Comma-separated allowed origins");
        println!("  RUST_LOG            Log filter (default: info,driftcheck_web=debug)");
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,driftcheck_web=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();

    info!("Driftcheck Web v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let server = DashboardServer::new(config)?;
    server.run().await.map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
