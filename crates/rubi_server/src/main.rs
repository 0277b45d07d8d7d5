//! Web server for RUBI.

use eyre::WrapErr;
use std::{env, net::SocketAddr};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let server_url = env::var("SERVER_URL")
        .wrap_err("Missing SERVER_URL")?
        .parse::<SocketAddr>()
        .wrap_err("Invalid SERVER_URL")?;
    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

    let router = rubi_server::router_from_vars(static_dir.into());

    tracing::info!("Starting server at {server_url}");
    let listener = TcpListener::bind(server_url)
        .await
        .wrap_err("Failed to bind to address")?;
    axum::serve(listener, router.into_make_service())
        .await
        .wrap_err("Failed to start server")?;
    Ok(())
}
