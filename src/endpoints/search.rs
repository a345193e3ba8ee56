use std::net::SocketAddr;

use askama::Template;
use axum::{extract::{ConnectInfo, Query, State}, response::Html};
use hyper::StatusCode;
use serde::Deserialize;
use tracing::{error, info};

use crate::{errors::{internal_error, LiveSearchError}, templates::LiveResults, SharedState};

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String
}

pub async fn live_search(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<SearchQuery>
) -> Result<Html<String>, (StatusCode, String)> {
    info!("[{}] Received GET request on /live-search/ for {:?}", addr, params.query);

    let live_results = LiveResults {
        people: state.directory.search(&params.query)
    };

    live_results.render()
        .map(Html)
        .map_err(|err| {
            error!("[{}] Unable to render live search results: {}", addr, err);
            internal_error(LiveSearchError::Render("Unable to render search results!"))
        })
}
