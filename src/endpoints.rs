pub(crate) mod index;
pub(crate) mod search;

use axum::{routing::get, Router};

use crate::SharedState;
use self::{
    index::index,
    search::live_search
};

pub fn get_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/live-search/", get(live_search))
}
