use adfree_reader::{server::start_server, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,adfree_reader=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env();
    start_server(config).await
}
