//! Dioxus front end: a single auto-refreshing opportunities table.
//!
//! Routes:
//!   /            → opportunities table
//!   /<anything>  → same table (single-page app, no other views)

pub mod highlight;
pub mod table;

use crate::bets::BetOpportunity;
use crate::config::Config;
use crate::feed::{FeedClient, FeedError};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;
use tracing::{debug, error, info};

use table::{row_cells, CellView, Column};

const TABLE_CSS: &str = include_str!("../../assets/data_table.css");

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Root component. Expects a [`Config`] in the root context, supplied at
/// launch.
#[component]
pub fn App() -> Element {
    rsx! {
        style { "{TABLE_CSS}" }
        Router::<Route> {}
    }
}

#[component]
fn Home() -> Element {
    rsx! { DataTable {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    debug!(path = %segments.join("/"), "unknown route, showing table");
    rsx! { DataTable {} }
}

/// Polls the feed and renders every opportunity, highest ROI first.
///
/// A failed refresh is logged and the previous rows stay on screen.
/// The next refresh starts one full period after the previous one finished,
/// so the schedule drifts by each request's latency instead of ticking at a
/// fixed rate; requests never overlap.
/// Unmounting drops the poll future, which also drops any pending request.
#[component]
pub fn DataTable() -> Element {
    let config = use_context::<Config>();
    let opportunities = use_signal(Vec::<BetOpportunity>::new);

    use_future(move || {
        let client = FeedClient::new(config.feed.url.clone());
        let period = config.feed.refresh_interval();
        async move {
            info!(url = %client.url(), every_secs = period.as_secs(), "starting feed poll");
            loop {
                refresh(&client, opportunities).await;
                TimeoutFuture::new(timeout_millis(period)).await;
            }
        }
    });

    let headers = Column::ALL.map(|column| (column.header(), column.accessor()));
    let rows: Vec<Vec<CellView>> = opportunities.read().iter().map(row_cells).collect();

    rsx! {
        table { class: "myTable",
            thead {
                tr {
                    for (header, field) in headers {
                        th { "data-field": "{field}", "{header}" }
                    }
                }
            }
            tbody {
                for (index, cells) in rows.into_iter().enumerate() {
                    tr { key: "{index}",
                        for CellView { text, style } in cells {
                            td {
                                div { style: "{style}", "{text}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn refresh(client: &FeedClient, mut opportunities: Signal<Vec<BetOpportunity>>) {
    let result = client.fetch_opportunities().await;
    apply_refresh(&mut opportunities.write(), result, client.url());
}

/// Replace the rows wholesale on success. On failure log and keep the
/// previous rows. Returns whether the rows were replaced.
fn apply_refresh(
    rows: &mut Vec<BetOpportunity>,
    result: Result<Vec<BetOpportunity>, FeedError>,
    url: &str,
) -> bool {
    match result {
        Ok(fresh) => {
            info!(rows = fresh.len(), "opportunities refreshed");
            *rows = fresh;
            true
        }
        Err(e) => {
            error!(error = %e, url = %url, "error fetching data, keeping previous rows");
            false
        }
    }
}

/// Browser timers take u32 milliseconds.
fn timeout_millis(period: Duration) -> u32 {
    u32::try_from(period.as_millis()).unwrap_or(u32::MAX)
}
