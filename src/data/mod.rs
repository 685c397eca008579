//! Market data providers.
//!
//! Defines the `GrowthProvider` trait and the one-shot probe that prints a
//! provider's raw response.

pub mod growth;

use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use tracing::{info, warn};

/// Abstraction over sources of financial-growth statements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrowthProvider: Send + Sync {
    /// Fetch the latest `limit` growth records for a symbol as raw JSON.
    async fn fetch_growth(&self, symbol: &str, limit: u32) -> Result<serde_json::Value>;
}

/// Fetch once and print the response as indented JSON.
///
/// Any failure is printed as `Error: ...` and swallowed; the return value
/// only says whether data was printed.
pub async fn run_probe<P, W>(provider: &P, symbol: &str, limit: u32, out: &mut W) -> Result<bool>
where
    P: GrowthProvider + ?Sized,
    W: Write,
{
    match provider.fetch_growth(symbol, limit).await {
        Ok(data) => {
            let records = data.as_array().map_or(1, Vec::len);
            info!(symbol, records, "Growth data received");
            writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
            Ok(true)
        }
        Err(e) => {
            warn!(symbol, error = %e, "Growth probe failed");
            writeln!(out, "Error: {e:#}")?;
            Ok(false)
        }
    }
}
