//! Bet opportunity records and the flatten/group/sort pass.
//!
//! The feed serves `{ source_id: [record, ...], ... }`. Records are merged
//! into a single list ordered by ROI, highest first.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Records keyed by the collector that produced them, in payload order.
pub type SourceMap = Vec<(String, Vec<BetOpportunity>)>;

/// One arbitrage opportunity as served by the feed.
///
/// Text fields accept strings, numbers or null; the feed is not consistent
/// about which it sends.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BetOpportunity {
    #[serde(rename = "Matchname", default, deserialize_with = "lenient_text")]
    pub match_name: String,
    #[serde(rename = "ROI", default = "Roi::missing")]
    pub roi: Roi,
    #[serde(rename = "Matchdate", default, deserialize_with = "lenient_text")]
    pub match_date: String,
    #[serde(rename = "Bettype", default, deserialize_with = "lenient_text")]
    pub bet_type: String,
    #[serde(rename = "Bookmaker1", default, deserialize_with = "lenient_text")]
    pub bookmaker_1: String,
    #[serde(rename = "Bookmaker2", default, deserialize_with = "lenient_text")]
    pub bookmaker_2: String,
    #[serde(rename = "PlayerName", default, deserialize_with = "lenient_text")]
    pub player_name: String,
    #[serde(rename = "Odds1", default, deserialize_with = "lenient_text")]
    pub odds_1: String,
    #[serde(rename = "Odds2", default, deserialize_with = "lenient_text")]
    pub odds_2: String,
    /// Grouping key only, never displayed.
    #[serde(default, deserialize_with = "lenient_text")]
    pub scraper_id: String,
}

/// Return on investment: the text as served plus its numeric value, if any.
///
/// A blank or null ROI counts as zero; a missing or non-numeric one has no
/// value and sorts after every numeric ROI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roi {
    text: String,
    value: Option<f64>,
}

impl Roi {
    /// Parse a textual ROI. Blank text is zero; non-numeric and non-finite
    /// text has no value.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        let value = if trimmed.is_empty() {
            Some(0.0)
        } else {
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        };
        Self { text, value }
    }

    /// ROI absent from the record.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<f64> for Roi {
    fn from(value: f64) -> Self {
        Self {
            text: value.to_string(),
            value: Some(value).filter(|v| v.is_finite()),
        }
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Roi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Roi::parse(""),
            Some(Value::Number(n)) => Roi {
                text: n.to_string(),
                value: n.as_f64().filter(|v| v.is_finite()),
            },
            Some(Value::String(s)) => Roi::parse(s),
            Some(other) => Roi {
                text: other.to_string(),
                value: None,
            },
        })
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Concatenate every source's records in key order (see [`order_keys`]).
pub fn flatten<I>(sources: I) -> Vec<BetOpportunity>
where
    I: IntoIterator<Item = (String, Vec<BetOpportunity>)>,
{
    let mut sources: Vec<_> = sources.into_iter().collect();
    order_keys(&mut sources, |(source_id, _)| source_id);
    sources.into_iter().flat_map(|(_, records)| records).collect()
}

/// Flatten, group by `scraper_id` and sort by ROI descending.
///
/// Ties keep grouped order: groups in key order, records inside a group in
/// flattened order.
pub fn merge_sources<I>(sources: I) -> Vec<BetOpportunity>
where
    I: IntoIterator<Item = (String, Vec<BetOpportunity>)>,
{
    let mut merged = group_by_scraper(flatten(sources));
    sort_by_roi(&mut merged);
    merged
}

/// Stable sort, highest ROI first. Records without a numeric ROI go last.
pub fn sort_by_roi(records: &mut [BetOpportunity]) {
    records.sort_by(|a, b| compare_roi_desc(&a.roi, &b.roi));
}

fn compare_roi_desc(a: &Roi, b: &Roi) -> Ordering {
    match (a.value(), b.value()) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn group_by_scraper(records: Vec<BetOpportunity>) -> Vec<BetOpportunity> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<BetOpportunity>)> = Vec::new();
    for record in records {
        let slot = *slots.entry(record.scraper_id.clone()).or_insert_with(|| {
            groups.push((record.scraper_id.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }
    order_keys(&mut groups, |(scraper_id, _)| scraper_id);
    groups.into_iter().flat_map(|(_, records)| records).collect()
}

/// Order keyed entries the way the feed's object keys enumerate: integer
/// keys ascending first, then every other key in insertion order.
fn order_keys<T>(entries: &mut [T], key: impl Fn(&T) -> &String) {
    entries.sort_by_key(|entry| match integer_key(key(entry)) {
        Some(index) => (0, index),
        None => (1, 0),
    });
}

/// Canonical non-negative integer below 2^32 - 1, e.g. "7" but not "07".
fn integer_key(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}
