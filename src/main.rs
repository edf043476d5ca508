use arbitrage_bets_wasm::config::Config;
use arbitrage_bets_wasm::dashboard::App;
use dioxus::prelude::LaunchBuilder;
use tracing::{error, info};

fn main() {
    let loaded = Config::embedded();

    // Initialize logging
    let level = loaded
        .as_ref()
        .map(|c| c.logging.tracing_level())
        .unwrap_or(tracing::Level::INFO);
    dioxus_logger::init(level).expect("failed to init logger");

    let config = loaded.unwrap_or_else(|e| {
        error!(error = %e, "bundled config rejected, using defaults");
        Config::default()
    });

    info!(
        url = %config.feed.url,
        refresh_secs = config.feed.refresh_interval_secs,
        "arbitrage table v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    // Parsed once here; components read it from the root context.
    LaunchBuilder::new().with_context(config).launch(App);
}
