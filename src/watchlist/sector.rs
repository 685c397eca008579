//! Sector grouping for the watchlist display.
//!
//! Classification is positional over the default universe: each block of
//! ten consecutive default symbols is one sector. Anything the user adds
//! outside that universe lands in `Other`.

use std::io::{self, Write};

use super::{Watchlist, DEFAULT_SYMBOLS};
use crate::types::{Sector, Ticker};

/// Symbols printed per row within a sector.
const ROW_WIDTH: usize = 10;

/// Classify a ticker into its display sector.
pub fn classify(ticker: &Ticker) -> Sector {
    match DEFAULT_SYMBOLS.iter().position(|s| *s == ticker.as_str()) {
        Some(idx) => match idx / 10 {
            0 | 1 => Sector::Technology,
            2 => Sector::Finance,
            3 => Sector::Healthcare,
            4 => Sector::Consumer,
            _ => Sector::Industrial,
        },
        None => Sector::Other,
    }
}

/// Group the watchlist by sector in display order, preserving the
/// watchlist's own order inside each group. Empty sectors are omitted.
pub fn group(list: &Watchlist) -> Vec<(Sector, Vec<&Ticker>)> {
    Sector::ALL
        .iter()
        .filter_map(|&sector| {
            let members: Vec<&Ticker> = list.iter().filter(|t| classify(t) == sector).collect();
            (!members.is_empty()).then_some((sector, members))
        })
        .collect()
}

/// Render the grouped watchlist with its header and footer rules.
pub fn render<W: Write>(list: &Watchlist, out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "CURRENT WATCHLIST ({} stocks)", list.len())?;
    writeln!(out, "{rule}")?;

    for (sector, members) in group(list) {
        writeln!(out, "\n{sector}:")?;
        for row in members.chunks(ROW_WIDTH) {
            let cells: Vec<String> = row.iter().map(|t| format!("{:6}", t.as_str())).collect();
            writeln!(out, "  {}", cells.join(" "))?;
        }
    }

    writeln!(out, "\n{rule}")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
