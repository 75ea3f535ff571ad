use std::sync::Arc;

use shelfscan_core::RawProduct;

use super::*;

fn record(title: &str, price: &str) -> ProductRecord {
    ProductRecord::from_raw(RawProduct {
        query: "airpods".to_string(),
        title: title.to_string(),
        url: "https://www.amazon.com/dp/B0TEST".to_string(),
        is_sponsored: false,
        currency_symbol: "$".to_string(),
        price: price.to_string(),
        list_price: price.to_string(),
        rating: 4.5,
    })
}

#[tokio::test]
async fn read_all_missing_resource_is_empty_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvStore::new(dir.path());
    let records = store.read_all("never-searched").expect("expected Ok");
    assert!(records.is_empty());
}

#[tokio::test]
async fn append_then_read_all_round_trips_every_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvStore::new(dir.path());

    let first = record("AirPods Pro", "$249.00");
    let second = record("AirPods Max", "$549.00");
    store.append("airpods", &first).await.expect("append");
    store.append("airpods", &second).await.expect("append");

    let back = store.read_all("airpods").expect("read_all");
    assert_eq!(back, vec![first, second]);
}

#[tokio::test]
async fn header_is_written_exactly_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvStore::new(dir.path());

    store.append("airpods", &record("A", "$1")).await.expect("append");
    store.append("airpods", &record("B", "$2")).await.expect("append");

    let contents = std::fs::read_to_string(store.path_for("airpods")).expect("read file");
    let header_lines = contents
        .lines()
        .filter(|l| l.starts_with("query,title,"))
        .count();
    assert_eq!(header_lines, 1);
    assert_eq!(contents.lines().count(), 3);
}

#[tokio::test]
async fn header_row_lists_fields_in_declared_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvStore::new(dir.path());
    store.append("airpods", &record("A", "$1")).await.expect("append");

    let contents = std::fs::read_to_string(store.path_for("airpods")).expect("read file");
    let header = contents.lines().next().expect("header line");
    assert_eq!(header, shelfscan_core::FIELD_NAMES.join(","));
}

#[tokio::test]
async fn queries_get_separate_resources() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvStore::new(dir.path());

    store.append("airpods", &record("A", "$1")).await.expect("append");
    store.append("keyboard", &record("K", "$2")).await.expect("append");

    assert_eq!(store.read_all("airpods").expect("read").len(), 1);
    assert_eq!(store.read_all("keyboard").expect("read").len(), 1);
}

#[tokio::test]
async fn titles_with_commas_survive_the_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvStore::new(dir.path());

    let tricky = record("AirPods Pro, 2nd Gen \"USB-C\"", "$199.00");
    store.append("airpods", &tricky).await.expect("append");

    let back = store.read_all("airpods").expect("read_all");
    assert_eq!(back, vec![tricky]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_never_corrupt_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(CsvStore::new(dir.path()));

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .append("airpods", &record(&format!("Item {i}"), "$9.99"))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("append");
    }

    let back = store.read_all("airpods").expect("read_all");
    assert_eq!(back.len(), 16);
    // every row parsed back whole; order across tasks is unspecified
    for r in &back {
        assert!(r.title.starts_with("Item "));
        assert!((r.price - 9.99).abs() < f64::EPSILON);
    }

    let contents = std::fs::read_to_string(store.path_for("airpods")).expect("read file");
    assert_eq!(contents.lines().count(), 17);
}
