//! Interactive watchlist editor.
//!
//! A numeric menu loop over any `BufRead`/`Write` pair, so sessions can be
//! driven from a terminal or scripted from tests. Nothing touches disk
//! until the user picks "Save and exit".

use anyhow::Result;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::storage;
use crate::types::{DeskError, Ticker};
use crate::watchlist::{sector, Watchlist};

const RULE_WIDTH: usize = 60;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Clear,
    Reset,
    SaveAndExit,
    ExitWithoutSaving,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Clear,
        MenuChoice::Reset,
        MenuChoice::SaveAndExit,
        MenuChoice::ExitWithoutSaving,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Remove),
            "3" => Some(MenuChoice::Clear),
            "4" => Some(MenuChoice::Reset),
            "5" => Some(MenuChoice::SaveAndExit),
            "6" => Some(MenuChoice::ExitWithoutSaving),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::Add => 1,
            MenuChoice::Remove => 2,
            MenuChoice::Clear => 3,
            MenuChoice::Reset => 4,
            MenuChoice::SaveAndExit => 5,
            MenuChoice::ExitWithoutSaving => 6,
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Add => "Add stock",
            MenuChoice::Remove => "Remove stock",
            MenuChoice::Clear => "Clear all",
            MenuChoice::Reset => "Reset to default",
            MenuChoice::SaveAndExit => "Save and exit",
            MenuChoice::ExitWithoutSaving => "Exit without saving",
        };
        write!(f, "{}. {label}", self.number())
    }
}

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Saved { path: PathBuf, count: usize },
    Discarded,
    /// Input closed mid-session; nothing was saved.
    Interrupted,
}

/// Input stream closed while waiting for the user.
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

pub struct Editor<R, W> {
    list: Watchlist,
    path: PathBuf,
    tournament_command: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Editor<R, W> {
    pub fn new(list: Watchlist, path: impl Into<PathBuf>, input: R, output: W) -> Self {
        Self {
            list,
            path: path.into(),
            tournament_command: "python tournament.py".to_string(),
            input,
            output,
        }
    }

    pub fn with_tournament_command(mut self, command: impl Into<String>) -> Self {
        self.tournament_command = command.into();
        self
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.list
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_parts(self) -> (Watchlist, W) {
        (self.list, self.output)
    }

    /// Run the menu loop until the user exits or input closes.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "AI TRADING TOURNAMENT - WATCHLIST EDITOR")?;
        writeln!(self.output, "{rule}")?;

        loop {
            match self.step() {
                Ok(Some(outcome)) => return Ok(outcome),
                Ok(None) => {}
                Err(e) if e.is::<EndOfInput>() => {
                    info!(count = self.list.len(), "Input closed, exiting without saving");
                    writeln!(self.output, "\n\n[WARNING] Exiting...")?;
                    return Ok(SessionOutcome::Interrupted);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Show the list and menu, then handle one choice.
    fn step(&mut self) -> Result<Option<SessionOutcome>> {
        sector::render(&self.list, &mut self.output)?;

        writeln!(self.output, "\nOptions:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "  {choice}")?;
        }

        let raw = self.prompt("\nEnter choice (1-6): ")?;
        let Some(choice) = MenuChoice::parse(&raw) else {
            writeln!(self.output, "[ERROR] Invalid choice")?;
            return Ok(None);
        };
        debug!(?choice, "Menu choice");

        match choice {
            MenuChoice::Add => self.add()?,
            MenuChoice::Remove => self.remove()?,
            MenuChoice::Clear => {
                if self.confirm("\n[WARNING] Clear entire watchlist? (yes/no): ")? {
                    self.list.clear();
                    info!("Watchlist cleared");
                    writeln!(self.output, "[OK] Watchlist cleared")?;
                } else {
                    writeln!(self.output, "Cancelled, watchlist unchanged")?;
                }
            }
            MenuChoice::Reset => {
                if self.confirm("\n[WARNING] Reset to default watchlist? (yes/no): ")? {
                    self.list.reset_to_default();
                    info!(count = self.list.len(), "Watchlist reset to default");
                    writeln!(self.output, "[OK] Watchlist reset to default")?;
                } else {
                    writeln!(self.output, "Cancelled, watchlist unchanged")?;
                }
            }
            MenuChoice::SaveAndExit => return self.save_and_exit(),
            MenuChoice::ExitWithoutSaving => {
                writeln!(self.output, "\n[WARNING] Exiting without saving changes")?;
                return Ok(Some(SessionOutcome::Discarded));
            }
        }
        Ok(None)
    }

    fn add(&mut self) -> Result<()> {
        let raw = self.prompt("\nEnter stock symbol to add (or 'cancel'): ")?;
        let ticker = match Ticker::parse(&raw) {
            Ok(t) if t == "CANCEL" => return Ok(()),
            Ok(t) => t,
            Err(DeskError::EmptySymbol) => {
                writeln!(self.output, "[ERROR] Invalid symbol")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match self.list.add(ticker.clone()) {
            Ok(()) => {
                debug!(symbol = %ticker, "Added");
                writeln!(self.output, "[OK] Added {ticker}")?;
            }
            Err(e @ DeskError::Duplicate(_)) => writeln!(self.output, "[WARNING] {e}")?,
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Blank input is rejected as an invalid symbol, the same as for add,
    /// rather than reported as a symbol missing from the list.
    fn remove(&mut self) -> Result<()> {
        let raw = self.prompt("\nEnter stock symbol to remove (or 'cancel'): ")?;
        let ticker = match Ticker::parse(&raw) {
            Ok(t) if t == "CANCEL" => return Ok(()),
            Ok(t) => t,
            Err(DeskError::EmptySymbol) => {
                writeln!(self.output, "[ERROR] Invalid symbol")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match self.list.remove(&ticker) {
            Ok(()) => {
                debug!(symbol = %ticker, "Removed");
                writeln!(self.output, "[OK] Removed {ticker}")?;
            }
            Err(e @ DeskError::NotFound(_)) => writeln!(self.output, "[ERROR] {e}")?,
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn save_and_exit(&mut self) -> Result<Option<SessionOutcome>> {
        let count = match storage::save_watchlist(&self.list, &self.path) {
            Ok(n) => n,
            Err(e) => {
                // Keep the session alive so the edits aren't lost.
                error!(error = %e, path = %self.path.display(), "Save failed");
                writeln!(self.output, "\n[ERROR] Could not save watchlist: {e:#}")?;
                return Ok(None);
            }
        };

        let path = self.path.display();
        info!(%path, count, "Watchlist saved");
        writeln!(self.output, "\n[OK] Watchlist saved to {path} ({count} stocks)")?;
        writeln!(self.output, "\n[OK] Watchlist finalized!")?;
        writeln!(self.output, "\nTo use this watchlist, run:")?;
        writeln!(self.output, "  {} --watchlist {path}", self.tournament_command)?;

        Ok(Some(SessionOutcome::Saved { path: self.path.clone(), count }))
    }

    /// `yes` (any case, surrounding whitespace ignored) confirms; anything else cancels.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(question)?;
        Ok(answer.trim().to_lowercase() == "yes")
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
