#![deny(warnings)]

use batch_sorter::{Server, ServerConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = ServerConfig::default();
    let server = Server::bind(&config).await?;
    info!("Server listening on {}...", server.local_addr()?);

    server
        .serve_until(async {
            // No handler means no graceful stop; keep serving until killed
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("server stopped");
    Ok(())
}
