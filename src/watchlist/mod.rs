//! Tournament watchlist.
//!
//! An ordered, duplicate-free list of tickers. Uniqueness is enforced by a
//! membership check on insert rather than a set type so that the user's
//! ordering survives every edit and every save.

pub mod sector;

use serde::{Deserialize, Serialize};

use crate::types::{DeskError, Ticker};

/// Default tournament universe: ten symbols each from technology, finance,
/// healthcare, consumer and industrial, in that order.
pub const DEFAULT_SYMBOLS: [&str; 60] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "AMD", "INTC", "AVGO",
    "ORCL", "CRM", "ADBE", "CSCO", "ACN", "IBM", "TXN", "QCOM", "AMAT", "ADI",
    "JPM", "BAC", "WFC", "GS", "MS", "C", "USB", "PNC", "TFC", "COF",
    "UNH", "JNJ", "PFE", "ABT", "TMO", "MRK", "LLY", "ABBV", "BMY", "AMGN",
    "WMT", "HD", "NKE", "MCD", "SBUX", "DIS", "NFLX", "CMCSA", "COST", "TGT",
    "BA", "CAT", "GE", "MMM", "HON", "UNP", "UPS", "RTX", "LMT", "DE",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    symbols: Vec<Ticker>,
}

impl Watchlist {
    /// An empty watchlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed 60-symbol default set, in its defined order.
    pub fn default_set() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS
                .iter()
                .map(|s| Ticker(s.to_string()))
                .collect(),
        }
    }

    /// Build from already-parsed tickers, keeping the first occurrence of
    /// any repeated symbol.
    pub fn from_tickers<I: IntoIterator<Item = Ticker>>(tickers: I) -> Self {
        let mut list = Self::new();
        for t in tickers {
            let _ = list.add(t);
        }
        list
    }

    pub fn symbols(&self) -> &[Ticker] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.symbols.contains(ticker)
    }

    /// Append a ticker unless it is already present.
    pub fn add(&mut self, ticker: Ticker) -> Result<(), DeskError> {
        if self.contains(&ticker) {
            return Err(DeskError::Duplicate(ticker));
        }
        self.symbols.push(ticker);
        Ok(())
    }

    /// Remove the (single) occurrence of a ticker.
    pub fn remove(&mut self, ticker: &Ticker) -> Result<(), DeskError> {
        match self.symbols.iter().position(|t| t == ticker) {
            Some(idx) => {
                self.symbols.remove(idx);
                Ok(())
            }
            None => Err(DeskError::NotFound(ticker.clone())),
        }
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn reset_to_default(&mut self) {
        *self = Self::default_set();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticker> {
        self.symbols.iter()
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a Ticker;
    type IntoIter = std::slice::Iter<'a, Ticker>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
