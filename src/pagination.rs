//! Greedy pagination over wrapped API responses.
//!
//! Search endpoints return one page at a time; [`collect_page_results`]
//! drains every continuation and concatenates the pages' `result` arrays
//! in order. For lazy, page-at-a-time consumption use
//! [`HiveResponse::fetch_next_page`] directly instead — greedy collection
//! buffers the entire result set in memory.

use serde_json::{json, Value};

use crate::error::Result;
use crate::response::HiveResponse;

/// Drains all pages reachable from `first`, returning a synthesized
/// response whose payload is `{"result": [..all items..]}` with no further
/// continuation.
///
/// Items appear in page order: everything from earlier pages precedes
/// everything from later pages. A page with no payload, or a payload
/// without a `result` array, contributes zero items rather than failing.
/// A failed page fetch aborts the drain and propagates the error.
///
/// ```no_run
/// use reaqta_hive::{collect_page_results, HiveClient, Query};
///
/// # async fn example(client: HiveClient) -> reaqta_hive::Result<()> {
/// let first = client.search_endpoints(Query::new()).await?;
/// let all = collect_page_results(first).await?;
/// println!("{} endpoints", all.data()["result"].as_array().map_or(0, Vec::len));
/// # Ok(())
/// # }
/// ```
pub async fn collect_page_results(first: HiveResponse) -> Result<HiveResponse> {
    let mut collected: Vec<Value> = Vec::new();
    let mut current = first;

    loop {
        if let Some(items) = current.data().get("result").and_then(Value::as_array) {
            collected.extend(items.iter().cloned());
        }

        match current.fetch_next_page().await {
            Some(next) => current = next?,
            None => break,
        }
    }

    Ok(HiveResponse::synthesized(json!({ "result": collected })))
}
