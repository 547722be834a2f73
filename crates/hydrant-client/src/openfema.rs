//! Live OpenFEMA page source backed by reqwest.

use std::time::Duration;

use hydrant_core::AwardRecord;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::fetch::{Page, PageRequest, PageSource};

/// Public Assistance Grant Award Activities (v2) endpoint.
pub const API_BASE: &str =
    "https://www.fema.gov/api/open/v2/PublicAssistanceGrantAwardActivities";

/// Fixed per-request bound; one slow page must not hang the retrieval.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the OpenFEMA paginated query protocol.
pub struct OpenFema {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFema {
    /// Client against the production endpoint.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(API_BASE)
    }

    /// Client against an alternative endpoint (mirrors, local fixtures).
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for OpenFema {
    async fn page(&self, req: &PageRequest) -> Result<Page, FetchError> {
        let mut query: Vec<(&str, String)> = vec![
            ("$filter", req.filter.clone()),
            ("$top", req.top.to_string()),
            ("$skip", req.skip.to_string()),
            ("$format", "json".to_string()),
        ];
        if let Some(select) = &req.select {
            query.push(("$select", select.join(",")));
        }
        if req.want_count {
            query.push(("$count", "true".to_string()));
        }

        let resp = self.client.get(&self.base_url).query(&query).send().await?;
        let url = resp.url().to_string();
        debug!(url = %url, skip = req.skip, "requested page");

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::status(status.as_u16(), &body));
        }

        let body = resp.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        let (rows, total_count) = split_payload(payload)?;
        Ok(Page {
            rows,
            total_count,
            url,
        })
    }
}

/// Split an OpenFEMA payload into its row list and the metadata count.
///
/// The name of the field holding the rows is not stable across server
/// versions, so the first list-valued top-level field (in document order)
/// wins. A payload with no list-valued field is a structural mismatch,
/// never an empty result.
fn split_payload(payload: Value) -> Result<(Vec<AwardRecord>, Option<u64>), FetchError> {
    let Value::Object(map) = payload else {
        return Err(FetchError::MissingRecordList);
    };

    let total_count = map
        .get("metadata")
        .and_then(|m| m.get("count"))
        .and_then(Value::as_u64);

    let rows = map
        .into_iter()
        .find_map(|(_, v)| match v {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .ok_or(FetchError::MissingRecordList)?;

    let records = rows
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(fields) => Some(AwardRecord::new(fields)),
            _ => None,
        })
        .collect();

    Ok((records, total_count))
}
