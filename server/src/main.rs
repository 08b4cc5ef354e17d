mod config;
mod routes;

use config::ServerConfig;

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("bind {addr} failed: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let app = routes::app(&config).map_err(ServerError::Leptos)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "backoffice listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
