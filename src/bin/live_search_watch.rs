//! Drives a live search from the terminal: every stdin line becomes the new
//! value of the search input, followed by one key release.

use std::{env, sync::Arc};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use live_search::{
    client::HttpSearchClient,
    config::SearchConfig,
    dom::{Document, Element},
    watcher::{KeystrokeOutcome, SearchInputWatcher, SEARCH_URL_ATTRIBUTE},
};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    live_search::init_tracing();
    if dotenv_result.is_err() {
        warn!("No .env file found, reading configuration from the environment only");
    }

    let config = SearchConfig::from_env()?;
    let base_url = env::var("SEARCH_BASE_URL")
        .context("SEARCH_BASE_URL must be set! Check your .env file!")?;
    let client = HttpSearchClient::with_base_url(&base_url)?;

    let document = Document::new()
        .with_element(
            Element::new(element_id(&config.input_selector))
                .with_data(SEARCH_URL_ATTRIBUTE, &config.endpoint_url)
        )
        .with_element(Element::new(element_id(&config.results_selector)));

    let input = document.select(&config.input_selector)?;
    let results = document.select(&config.results_selector)?;
    let watcher = SearchInputWatcher::attach(config, &document, Arc::new(client))?;

    let mut changes = results.subscribe();
    let printer = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let html = changes.borrow_and_update().clone();
            println!("{}", if html.is_empty() { "(no results)" } else { html.as_str() });
        }
    });

    info!("Searching {} as you type, one query per line", base_url);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = None;
    while let Some(line) = lines.next_line().await? {
        input.set_value(line);
        if let KeystrokeOutcome::Dispatched(dispatch) = watcher.on_key_up() {
            last = Some(dispatch);
        } else {
            last = None;
        }
    }

    if let Some(dispatch) = last {
        let query = dispatch.query.clone();
        let outcome = dispatch.finished().await;
        info!("Last search for {:?} finished: {:?}", query, outcome);
    }

    // The printer stops once every handle on the results container is gone.
    drop((watcher, document, input, results));
    printer.await?;

    Ok(())
}

fn element_id(selector: &str) -> &str {
    selector.strip_prefix('#').unwrap_or(selector)
}
