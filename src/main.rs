use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{info, warn};

use live_search::{app, config::{SearchConfig, ServerConfig}, directory::Directory, SharedState, State};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    live_search::init_tracing();
    if dotenv_result.is_err() {
        warn!("No .env file found, reading configuration from the environment only");
    }

    let server_config = ServerConfig::from_env()?;
    let search_config = SearchConfig::from_env()?;

    let directory = match &server_config.directory_path {
        Some(path) => Directory::load(path)?,
        None => {
            warn!("DIRECTORY_PATH is not set, live search will not find anyone");
            Directory::default()
        }
    };

    info!("Initializing service with {} people...", directory.len());
    let shared_state: SharedState = Arc::new(State::new(directory, search_config));

    let addr = &server_config.address;
    let listener = tokio::net::TcpListener::bind(addr)
        .await?;

    info!("Service now listening on {}", addr);
    axum::serve(
        listener,
        app(shared_state).into_make_service_with_connect_info::<SocketAddr>()
    ).await?;

    Ok(())
}
