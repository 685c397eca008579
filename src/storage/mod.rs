//! Persistence layer.
//!
//! Saves and loads the watchlist to/from a flat text file: one uppercase
//! ticker per line, no header. Writes go to a sibling temp file which is
//! then renamed over the target, so a save is all-or-nothing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::types::Ticker;
use crate::watchlist::Watchlist;

/// Default watchlist file path, as read by the tournament runner.
pub const DEFAULT_WATCHLIST_FILE: &str = "tournament_watchlist.txt";

/// Parse watchlist file contents. Lines are trimmed and upper-cased;
/// blank lines are skipped and repeats collapse to the first occurrence.
pub fn parse_watchlist(contents: &str) -> Watchlist {
    Watchlist::from_tickers(contents.lines().filter_map(|line| Ticker::parse(line).ok()))
}

/// Render a watchlist in file format, every line newline-terminated.
pub fn format_watchlist(list: &Watchlist) -> String {
    let mut out = String::with_capacity(list.len() * 6);
    for t in list {
        out.push_str(t.as_str());
        out.push('\n');
    }
    out
}

/// Load the watchlist from `path`.
/// Returns None if the file doesn't exist.
pub fn load_watchlist(path: &Path) -> Result<Option<Watchlist>> {
    if !path.exists() {
        info!(path = %path.display(), "No saved watchlist found");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read watchlist from {}", path.display()))?;

    let list = parse_watchlist(&contents);
    info!(path = %path.display(), count = list.len(), "Watchlist loaded from disk");
    Ok(Some(list))
}

/// Load the watchlist, falling back to the default set when no file exists.
pub fn load_or_default(path: &Path) -> Result<Watchlist> {
    Ok(load_watchlist(path)?.unwrap_or_else(Watchlist::default_set))
}

/// Overwrite `path` with the watchlist. Returns the number of symbols written.
pub fn save_watchlist(list: &Watchlist, path: &Path) -> Result<usize> {
    let tmp = temp_sibling(path);
    std::fs::write(&tmp, format_watchlist(list))
        .with_context(|| format!("Failed to write watchlist to {}", tmp.display()))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to replace watchlist at {}", path.display()));
    }

    debug!(path = %path.display(), count = list.len(), "Watchlist saved");
    Ok(list.len())
}

/// Delete the watchlist file (for testing or reset).
pub fn delete_watchlist(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to delete watchlist file {}", path.display()))?;
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_WATCHLIST_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
