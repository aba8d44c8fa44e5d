use std::env;
use std::net::SocketAddr;

use anyhow::anyhow;
use clap::Parser;
use tokio::net::TcpListener;

use retell_groq_gateway::{AppState, ServerConfig, routes};

/// Retell Groq Gateway - Custom LLM WebSocket server
#[derive(Parser, Debug)]
#[command(name = "retell-groq-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let env_file = if env::var("NODE_ENV").as_deref() == Ok("development") {
        ".env.development"
    } else {
        ".env"
    };
    let _ = dotenvy::from_filename(env_file);

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(host) = cli.host {
        config.host = host;
    }

    let address = config.address();
    println!("Starting server on {address}");
    println!("WebSocket endpoint: ws://{address}/llm-websocket/{{call_id}}");

    // Create application state
    let app_state = AppState::new(config);

    // Combine routes: health + webhook + per-call WebSocket sessions
    let app = routes::api::create_api_router()
        .merge(routes::session::create_session_router())
        .with_state(std::sync::Arc::new(app_state));

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    println!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
