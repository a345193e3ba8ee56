pub mod client;
pub mod config;
pub mod directory;
pub mod dom;
pub mod endpoints;
pub mod errors;
mod templates;
pub mod watcher;


use std::sync::Arc;

use axum::Router;
use config::SearchConfig;
use directory::Directory;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct State {
    pub directory: Directory,
    pub search: SearchConfig
}

impl State {
    pub fn new(directory: Directory, search: SearchConfig) -> State {
        State {
            directory,
            search
        }
    }
}

pub type SharedState = Arc<State>;

pub fn app(state: SharedState) -> Router {
    endpoints::get_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "live_search=debug,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
        )
        .init();
}
