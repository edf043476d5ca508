//! Arbitrage feed fetcher.
//!
//! The endpoint returns an object keyed by source id whose values are arrays
//! of opportunity records. Some deployments serve that object JSON-encoded a
//! second time, as a string; both shapes are accepted.

use crate::bets::{merge_sources, BetOpportunity, SourceMap};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(u16),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Parse a feed body into per-source records.
///
/// Non-array source values and non-object records are skipped with a warning
/// rather than failing the whole refresh.
pub fn parse_payload(body: &str) -> Result<SourceMap, FeedError> {
    let mut payload: Value = serde_json::from_str(body)?;
    if let Value::String(inner) = payload {
        payload = serde_json::from_str(&inner)?;
    }

    let Value::Object(map) = payload else {
        return Err(FeedError::UnexpectedShape("top level is not an object"));
    };

    let mut sources = SourceMap::with_capacity(map.len());
    for (source_id, value) in map {
        let Value::Array(items) = value else {
            warn!(source = %source_id, "source value is not an array, skipping");
            continue;
        };

        let total = items.len();
        let records: Vec<BetOpportunity> = items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(source = %source_id, error = %e, "undecodable record");
                    None
                }
            })
            .collect();

        if records.len() < total {
            warn!(
                source = %source_id,
                skipped = total - records.len(),
                kept = records.len(),
                "skipped malformed records"
            );
        }
        debug!(source = %source_id, records = records.len(), "parsed source");
        sources.push((source_id, records));
    }

    Ok(sources)
}

/// Anything outside 2xx fails the refresh.
pub fn check_status(status: StatusCode) -> Result<(), FeedError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FeedError::Status(status.as_u16()))
    }
}

pub struct FeedClient {
    url: String,
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and parse it into per-source records.
    pub async fn fetch_sources(&self) -> Result<SourceMap, FeedError> {
        let resp = self.client.get(&self.url).send().await?;
        check_status(resp.status())?;

        let body = resp.text().await?;
        parse_payload(&body)
    }

    /// Fetch, flatten and sort. Highest ROI first.
    pub async fn fetch_opportunities(&self) -> Result<Vec<BetOpportunity>, FeedError> {
        let sources = self.fetch_sources().await?;
        Ok(merge_sources(sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "oddsjet": [
                { "Matchname": "A - B", "ROI": 1.2, "scraper_id": "oddsjet" },
                { "Matchname": "C - D", "ROI": "3.4", "scraper_id": "oddsjet" }
            ],
            "circus": [
                { "Matchname": "E - F", "ROI": 2.0, "scraper_id": "circus" }
            ]
        })
    }

    #[test]
    fn test_parse_object_payload() {
        let sources = parse_payload(&sample().to_string()).unwrap();
        let keys: Vec<&str> = sources.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["oddsjet", "circus"]);
        assert_eq!(sources[0].1.len(), 2);
        assert_eq!(sources[1].1[0].match_name, "E - F");
    }

    #[test]
    fn test_parse_double_encoded_payload() {
        let encoded = Value::String(sample().to_string()).to_string();
        assert!(encoded.starts_with('"'));
        let sources = parse_payload(&encoded).unwrap();
        assert_eq!(sources, parse_payload(&sample().to_string()).unwrap());

        let merged = merge_sources(sources);
        let names: Vec<&str> = merged.iter().map(|r| r.match_name.as_str()).collect();
        assert_eq!(names, vec!["C - D", "E - F", "A - B"]);
    }

    #[test]
    fn test_rejects_non_object_top_level() {
        let err = parse_payload("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, FeedError::UnexpectedShape(_)));

        let err = parse_payload(r#""[]""#).unwrap_err();
        assert!(matches!(err, FeedError::UnexpectedShape(_)));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(parse_payload("{not json"), Err(FeedError::Json(_))));
        assert!(matches!(parse_payload(r#""{broken""#), Err(FeedError::Json(_))));
    }

    #[test]
    fn test_skips_bad_sources_and_records() {
        let body = json!({
            "status": "ok",
            "good": [
                { "Matchname": "kept" },
                42,
                "text",
                null
            ]
        })
        .to_string();
        let sources = parse_payload(&body).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].0, "good");
        assert_eq!(sources[0].1.len(), 1);
        assert_eq!(sources[0].1[0].match_name, "kept");
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(check_status(StatusCode::NO_CONTENT).is_ok());
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY),
            Err(FeedError::Status(502))
        ));
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND),
            Err(FeedError::Status(404))
        ));
        assert!(matches!(
            check_status(StatusCode::MOVED_PERMANENTLY),
            Err(FeedError::Status(301))
        ));
        assert_eq!(
            check_status(StatusCode::SERVICE_UNAVAILABLE)
                .unwrap_err()
                .to_string(),
            "feed returned HTTP 503"
        );
    }

    #[test]
    fn test_empty_object() {
        assert!(parse_payload("{}").unwrap().is_empty());
    }
}
