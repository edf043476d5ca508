//! Arbitrage opportunities table for the browser.
//!
//! Framework-free pieces (`bets`, `feed`, `config`) are kept separate from
//! the Dioxus components in `dashboard` so they can be tested natively.

pub mod bets;
pub mod config;
pub mod dashboard;
pub mod feed;
