//! tickerdesk — tournament watchlist tooling
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry points.

pub mod config;
pub mod types;
pub mod watchlist;
pub mod storage;
pub mod editor;
pub mod data;
pub mod crew;
pub mod logging;
