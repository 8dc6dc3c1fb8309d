use quoridor_arena::web::{ServerConfig, run_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quoridor_arena=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    run_server(config).await
}
