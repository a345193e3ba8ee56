use std::net::SocketAddr;

use askama::Template;
use axum::{extract::{ConnectInfo, State}, response::Html};
use hyper::StatusCode;
use tracing::{error, info};

use crate::{errors::{internal_error, LiveSearchError}, templates::Search, SharedState};

pub async fn index(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>
) -> Result<Html<String>, (StatusCode, String)> {
    info!("[{}] Received GET request on /", addr);

    let config = &state.search;
    let search = Search {
        input_id: element_id(&config.input_selector),
        results_id: element_id(&config.results_selector),
        search_url: &config.endpoint_url
    };

    search.render()
        .map(Html)
        .map_err(|err| {
            error!("[{}] Unable to render search page: {}", addr, err);
            internal_error(LiveSearchError::Render("Unable to render the search page!"))
        })
}

fn element_id(selector: &str) -> &str {
    selector.strip_prefix('#').unwrap_or(selector)
}
