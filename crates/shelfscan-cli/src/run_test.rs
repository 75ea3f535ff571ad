use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfscan_scraper::SearchClient;
use shelfscan_store::CsvStore;

use super::*;

fn test_client(server: &MockServer, max_retries: u32) -> SearchClient {
    SearchClient::new("test-key", "us", 5, max_retries, 0)
        .expect("failed to build test SearchClient")
        .with_proxy_endpoint(&server.uri())
}

/// Matches the proxy request for one specific page of `query`.
fn page_matcher(query: &str, page: u32) -> wiremock::matchers::QueryParamExactMatcher {
    query_param(
        "url",
        format!("https://www.amazon.com/s?k={query}&page={page}"),
    )
}

/// A page body with one genuine result block.
fn page_body(title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
          <div data-component-type="s-search-result">
            <h2><a href="/dp/B0TEST"><span>{title}</span></a></h2>
            <span class="a-price-symbol">$</span>
            <span class="a-offscreen">{price}</span>
            <span class="a-icon-alt">4.5 out of 5 stars</span>
          </div>
        </body></html>"#
    )
}

#[tokio::test]
async fn run_persists_records_from_every_page() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(page_matcher("widget", 1))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body("Widget One", "$10.00")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(page_matcher("widget", 2))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body("Widget Two", "$20.00")))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let store = CsvStore::new(dir.path());

    let totals = run_search(&client, &store, "widget", 2, 3).await;
    assert_eq!(totals.pages_ok, 2);
    assert_eq!(totals.pages_failed, 0);
    assert_eq!(totals.records, 2);

    let mut titles: Vec<String> = store
        .read_all("widget")
        .expect("read_all")
        .into_iter()
        .map(|r| r.title)
        .collect();
    titles.sort();
    assert_eq!(titles, ["Widget One", "Widget Two"]);
}

/// Transport failures on attempts 1 and 2 of 3, success on attempt 3: the
/// page's records are still persisted and no terminal failure is counted.
#[tokio::test]
async fn page_recovering_within_attempts_still_persists() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body("Recovered", "$5.00")))
        .mount(&server)
        .await;

    let client = test_client(&server, 3);
    let store = CsvStore::new(dir.path());

    let totals = run_search(&client, &store, "widget", 1, 1).await;
    assert_eq!(totals.pages_failed, 0);
    assert_eq!(totals.records, 1);
    assert_eq!(store.read_all("widget").expect("read_all").len(), 1);
}

/// One page fails terminally while its sibling succeeds: the run completes,
/// the failed page contributes zero records.
#[tokio::test]
async fn terminal_page_failure_does_not_abort_siblings() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(page_matcher("widget", 1))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(page_matcher("widget", 2))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body("Survivor", "$7.00")))
        .mount(&server)
        .await;

    let client = test_client(&server, 2);
    let store = CsvStore::new(dir.path());

    let totals = run_search(&client, &store, "widget", 2, 2).await;
    assert_eq!(totals.pages_ok, 1);
    assert_eq!(totals.pages_failed, 1);

    let records = store.read_all("widget").expect("read_all");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Survivor");
}

/// Even with every page failing terminally the run completes normally:
/// failures are logged and counted, never surfaced as a run-level error.
#[tokio::test]
async fn all_pages_failing_still_completes_the_run() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server, 2);
    let store = CsvStore::new(dir.path());

    let totals = run_search(&client, &store, "widget", 2, 2).await;
    assert_eq!(totals.pages_ok, 0);
    assert_eq!(totals.pages_failed, 2);
    assert_eq!(totals.records, 0);
    assert!(store.read_all("widget").expect("read_all").is_empty());
}

/// A single-page run whose only page fails terminally is still a completed
/// run, leaving an empty (displayable) result set behind.
#[tokio::test]
async fn single_failing_page_does_not_fail_the_run() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server, 2);
    let store = CsvStore::new(dir.path());

    let totals = run_search(&client, &store, "widget", 1, 1).await;
    assert_eq!(totals.pages_ok, 0);
    assert_eq!(totals.pages_failed, 1);
    assert!(store.read_all("widget").expect("read_all").is_empty());
}

/// A record that cannot be written is logged and skipped; the page itself
/// still counts as fetched rather than failed.
#[tokio::test]
async fn append_failure_skips_record_without_failing_the_page() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body("Unwritable", "$1.00")))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    // a store rooted in a directory that does not exist makes every append fail
    let store = CsvStore::new(dir.path().join("missing-subdir"));

    let totals = run_search(&client, &store, "widget", 1, 1).await;
    assert_eq!(totals.pages_ok, 1);
    assert_eq!(totals.pages_failed, 0);
    assert_eq!(totals.records, 0);
}

/// A 200 page with no result blocks is a successful page with zero records.
#[tokio::test]
async fn empty_results_page_counts_as_success() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let store = CsvStore::new(dir.path());

    let totals = run_search(&client, &store, "widget", 1, 1).await;
    assert_eq!(totals.pages_ok, 1);
    assert_eq!(totals.records, 0);
}
