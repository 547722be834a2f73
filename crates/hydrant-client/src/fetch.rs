//! The exhaustive pagination loop.

use std::future::Future;

use hydrant_core::{AwardRecord, ResultSet};
use tracing::info;

use crate::error::FetchError;

/// One page request issued against the remote source.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub filter: String,
    /// Field subset to retrieve; `None` retrieves all fields.
    pub select: Option<Vec<String>>,
    pub top: u64,
    pub skip: u64,
    /// Ask the server for an inline total count (first page only).
    pub want_count: bool,
}

/// One page as returned by a [`PageSource`].
#[derive(Debug, Clone)]
pub struct Page {
    pub rows: Vec<AwardRecord>,
    /// Server-reported total across all pages, when the request asked for
    /// one and the server answered.
    pub total_count: Option<u64>,
    /// The exact request URL, kept for diagnostic reproduction.
    pub url: String,
}

/// A page-oriented remote source.
///
/// The live implementation is [`crate::OpenFema`]; tests drive
/// [`fetch_all`] with scripted sources instead of a server.
pub trait PageSource {
    fn page(
        &self,
        req: &PageRequest,
    ) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

/// Retrieve the complete result set for a filter expression.
///
/// Pages are fetched strictly sequentially: the skip of request N+1
/// depends on completion of request N, so there is nothing to run
/// concurrently. The loop stops on a zero-row page (exhaustion) or a
/// short page (last page, after accumulating it). A single failed page
/// aborts the whole retrieval; no partial results are surfaced and no
/// retry is attempted.
///
/// After each accumulated page, if the server ever reported a total
/// count, `progress` observes `min(1, accumulated / max(total, 1))`,
/// which is non-decreasing across the loop. Without a server count,
/// `progress` is never called.
pub async fn fetch_all<S: PageSource>(
    source: &S,
    filter: &str,
    select: Option<&[String]>,
    page_size: u64,
    mut progress: impl FnMut(f64),
) -> Result<ResultSet, FetchError> {
    let mut records: Vec<AwardRecord> = Vec::new();
    let mut total_count: Option<u64> = None;
    let mut last_url = String::new();
    let mut skip = 0u64;

    loop {
        let req = PageRequest {
            filter: filter.to_string(),
            select: select.map(<[String]>::to_vec),
            top: page_size,
            skip,
            want_count: total_count.is_none(),
        };
        let page = source.page(&req).await?;
        last_url = page.url;
        if total_count.is_none() {
            total_count = page.total_count;
        }

        let returned = page.rows.len() as u64;
        if returned == 0 {
            break;
        }
        records.extend(page.rows);
        skip += page_size;

        if let Some(total) = total_count {
            progress((records.len() as f64 / total.max(1) as f64).min(1.0));
        }
        if returned < page_size {
            break;
        }
    }

    info!(
        rows = records.len(),
        total = total_count.unwrap_or(0),
        "retrieval complete"
    );
    Ok(ResultSet {
        records,
        total_count: total_count.unwrap_or(0),
        last_url,
    })
}
