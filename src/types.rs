//! Shared types for tickerdesk.
//!
//! The watchlist, editor, storage and probe modules all speak in terms of
//! `Ticker` and report domain failures through `DeskError`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------

/// A stock ticker symbol: trimmed, upper-cased, never empty.
///
/// No character-class validation is applied; share-class symbols such as
/// `BRK.B` are accepted as typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(pub(crate) String);

impl Ticker {
    /// Normalise raw user or file input into a ticker.
    pub fn parse(raw: &str) -> Result<Self, DeskError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DeskError::EmptySymbol);
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = DeskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl PartialEq<&str> for Ticker {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// Sector
// ---------------------------------------------------------------------------

/// Coarse sector bucket used to group the watchlist display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Technology,
    Finance,
    Healthcare,
    Consumer,
    Industrial,
    Other,
}

impl Sector {
    /// Display order for grouped output.
    pub const ALL: [Sector; 6] = [
        Sector::Technology,
        Sector::Finance,
        Sector::Healthcare,
        Sector::Consumer,
        Sector::Industrial,
        Sector::Other,
    ];
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sector::Technology => write!(f, "Technology"),
            Sector::Finance => write!(f, "Finance"),
            Sector::Healthcare => write!(f, "Healthcare"),
            Sector::Consumer => write!(f, "Consumer"),
            Sector::Industrial => write!(f, "Industrial"),
            Sector::Other => write!(f, "Other"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for tickerdesk.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("Invalid symbol: input is empty")]
    EmptySymbol,

    #[error("{0} is already in watchlist")]
    Duplicate(Ticker),

    #[error("{0} not found in watchlist")]
    NotFound(Ticker),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable not set: {0}")]
    MissingSecret(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid crew definition: {0}")]
    InvalidCrew(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
