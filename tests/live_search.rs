use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use live_search::{
    app,
    client::{HttpSearchClient, SearchClient},
    config::SearchConfig,
    directory::{Directory, Person, Role},
    dom::{Document, Element},
    errors::SearchError,
    watcher::{FetchOutcome, KeystrokeOutcome, SearchInputWatcher, SEARCH_URL_ATTRIBUTE},
    State,
};

fn person(username: &str, first_name: &str, last_name: &str, role: Option<Role>) -> Person {
    Person {
        username: username.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        role,
    }
}

fn directory() -> Directory {
    Directory::new(vec![
        person("searchable_user", "Searchable", "User", Some(Role::Student)),
        person("tlovelace", "Ada", "Lovelace", Some(Role::Teacher)),
        person("admin", "Site", "Admin", None),
    ])
}

fn router() -> Router {
    app(Arc::new(State::new(directory(), SearchConfig::default())))
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 8000))))
}

async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router should answer");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("read body");

    (status, content_type, String::from_utf8_lossy(&body).into_owned())
}

async fn serve() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let state = Arc::new(State::new(directory(), SearchConfig::default()));

    tokio::spawn(async move {
        axum::serve(
            listener,
            app(state).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("server stopped");
    });

    addr
}

#[tokio::test]
async fn live_search_lists_matching_people() {
    let (status, content_type, body) = get("/live-search/?query=Searchable").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("Searchable User"));
    assert!(body.contains("(searchable_user)"));
    assert!(!body.contains("Lovelace"));
}

#[tokio::test]
async fn live_search_ignores_people_without_a_role() {
    let (status, _, body) = get("/live-search/?query=admin").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No users found."));
}

#[tokio::test]
async fn live_search_without_query_finds_nobody() {
    let (status, _, body) = get("/live-search/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No users found."));
}

#[tokio::test]
async fn index_renders_the_search_input_and_results_container() {
    let (status, _, body) = get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"id="live-search""#));
    assert!(body.contains(r#"id="live-search-results""#));
    assert!(body.contains("data-search-url="));
}

#[tokio::test]
async fn watcher_renders_results_from_the_live_search_endpoint() {
    let addr = serve().await;
    let client = HttpSearchClient::with_base_url(&format!("http://{}", addr)).unwrap();

    let document = Document::new()
        .with_element(Element::new("live-search").with_data(SEARCH_URL_ATTRIBUTE, "/live-search/"))
        .with_element(Element::new("live-search-results"));
    let input = document.select("#live-search").unwrap();
    let results = document.select("#live-search-results").unwrap();
    let watcher = SearchInputWatcher::attach(SearchConfig::default(), &document, Arc::new(client))
        .expect("attach watcher");

    input.set_value("lovel");
    let KeystrokeOutcome::Dispatched(dispatch) = watcher.on_key_up() else {
        panic!("expected a request for a five character query");
    };
    assert_eq!(dispatch.finished().await, FetchOutcome::Rendered);
    assert!(results.inner_html().contains("Ada Lovelace"));

    input.set_value("xyzzy");
    let KeystrokeOutcome::Dispatched(dispatch) = watcher.on_key_up() else {
        panic!("expected a request for a five character query");
    };
    assert_eq!(dispatch.finished().await, FetchOutcome::Rendered);
    assert!(results.inner_html().contains("No users found."));

    input.set_value("lo");
    assert!(matches!(watcher.on_key_up(), KeystrokeOutcome::Cleared));
    assert_eq!(results.inner_html(), "");
}

#[tokio::test]
async fn watcher_keeps_results_when_the_endpoint_fails() {
    let addr = serve().await;
    let client = HttpSearchClient::with_base_url(&format!("http://{}", addr)).unwrap();

    let document = Document::new()
        .with_element(Element::new("live-search").with_data(SEARCH_URL_ATTRIBUTE, "/missing/"))
        .with_element(Element::new("live-search-results"));
    let input = document.select("#live-search").unwrap();
    let results = document.select("#live-search-results").unwrap();
    results.set_inner_html("<ul><li>Earlier</li></ul>");
    let watcher = SearchInputWatcher::attach(SearchConfig::default(), &document, Arc::new(client))
        .expect("attach watcher");

    input.set_value("lovel");
    let KeystrokeOutcome::Dispatched(dispatch) = watcher.on_key_up() else {
        panic!("expected a request for a five character query");
    };
    assert_eq!(dispatch.finished().await, FetchOutcome::Failed);
    assert_eq!(results.inner_html(), "<ul><li>Earlier</li></ul>");
}

#[tokio::test]
async fn http_client_reports_error_statuses() {
    let addr = serve().await;
    let client = HttpSearchClient::with_base_url(&format!("http://{}", addr)).unwrap();

    let err = client.fetch("/missing/", "abc").await.unwrap_err();
    assert!(matches!(err, SearchError::Status(StatusCode::NOT_FOUND)));

    let body = client.fetch("/live-search/", "Searchable").await.unwrap();
    assert!(body.contains("Searchable User"));
}
