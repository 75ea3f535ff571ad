//! Fan-out of page fetches across a bounded worker pool.
//!
//! One future per page number, at most `max_workers` in flight at a time.
//! Every page runs to completion independently: a page that exhausts its
//! retries is logged and skipped, and never cancels or fails its siblings.

use futures::stream::{self, StreamExt};

use shelfscan_core::ProductRecord;
use shelfscan_scraper::{extract_products, SearchClient};
use shelfscan_store::CsvStore;

/// Outcome of one page task: the number of records persisted, or the
/// terminal error after retries ran out.
enum PageOutcome {
    Ok { records: usize },
    Err(anyhow::Error),
}

/// Aggregate totals for one search run.
pub struct RunTotals {
    pub pages_ok: u32,
    pub pages_failed: u32,
    pub records: usize,
}

/// Fetches pages `1..=pages` of `query` concurrently and persists extracted
/// records as a side effect of each page task.
///
/// Completion order across pages is unspecified, so rows in the shared CSV
/// resource may not follow page order; within one page, records keep the
/// order they were matched on the page.
///
/// Page failures are contained here: each terminal failure is logged and
/// counted, and the run always completes — even when every page failed.
pub async fn run_search(
    client: &SearchClient,
    store: &CsvStore,
    query: &str,
    pages: u32,
    max_workers: usize,
) -> RunTotals {
    let max_workers = max_workers.max(1);

    let results: Vec<(u32, PageOutcome)> = stream::iter(1..=pages)
        .map(|page| async move { (page, process_page(client, store, query, page).await) })
        .buffer_unordered(max_workers)
        .collect()
        .await;

    let mut totals = RunTotals {
        pages_ok: 0,
        pages_failed: 0,
        records: 0,
    };
    for (page, outcome) in results {
        match outcome {
            PageOutcome::Ok { records } => {
                totals.pages_ok += 1;
                totals.records += records;
            }
            PageOutcome::Err(e) => {
                tracing::error!(query, page, error = %e, "page failed terminally");
                totals.pages_failed += 1;
            }
        }
    }

    if totals.pages_failed > 0 {
        tracing::warn!(
            failed = totals.pages_failed,
            total = pages,
            "some pages failed during the run"
        );
    }

    tracing::info!(
        query,
        pages_ok = totals.pages_ok,
        records = totals.records,
        "search run complete"
    );
    totals
}

/// Fetch → extract → normalize → append for a single page.
///
/// Records are persisted one at a time as they come off the page, never
/// collected and written in bulk. Zero extracted records from a fetched
/// page is a valid successful outcome, and a failed write for one record
/// does not discard the remaining records of the page.
async fn process_page(
    client: &SearchClient,
    store: &CsvStore,
    query: &str,
    page: u32,
) -> PageOutcome {
    let body = match client.fetch_page(query, page).await {
        Ok(body) => body,
        Err(e) => return PageOutcome::Err(e.into()),
    };
    tracing::info!(query, page, "fetched search page");

    let mut written = 0usize;
    for raw in extract_products(&body, query) {
        let record = ProductRecord::from_raw(raw);
        match store.append(query, &record).await {
            Ok(()) => written += 1,
            Err(e) => {
                tracing::error!(query, page, error = %e, "failed to persist record");
            }
        }
    }
    PageOutcome::Ok { records: written }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
