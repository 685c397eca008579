//! Scripted editor sessions against real files.
//!
//! Each test loads through `storage`, runs an `Editor` over in-memory
//! input, and checks what ends up on disk.

use std::io::Cursor;
use std::path::PathBuf;

use tickerdesk::editor::{Editor, SessionOutcome};
use tickerdesk::storage;
use tickerdesk::types::Ticker;
use tickerdesk::watchlist::Watchlist;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("tickerdesk_it_{}.txt", uuid::Uuid::new_v4()))
}

fn run(path: &PathBuf, script: &str) -> (SessionOutcome, String) {
    let list = storage::load_or_default(path).unwrap();
    let mut editor = Editor::new(list, path, Cursor::new(script.to_string()), Vec::new());
    let outcome = editor.run().unwrap();
    let (_, out) = editor.into_parts();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn fresh_start_shows_default_universe() {
    let path = temp_path();
    let (outcome, out) = run(&path, "6\n");
    assert_eq!(outcome, SessionOutcome::Discarded);
    assert!(out.contains("CURRENT WATCHLIST (60 stocks)"));
    for sector in ["Technology:", "Finance:", "Healthcare:", "Consumer:", "Industrial:"] {
        assert!(out.contains(sector), "missing {sector}");
    }
    assert!(!path.exists());
}

#[test]
fn worked_example_round_trip() {
    let path = temp_path();
    std::fs::write(&path, "AAPL\nMSFT\n").unwrap();

    let (outcome, _) = run(&path, "1\ntsla\n2\nMSFT\n5\n");
    assert_eq!(outcome, SessionOutcome::Saved { path: path.clone(), count: 2 });
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "AAPL\nTSLA\n");

    // A second session picks up exactly what was saved
    let (_, out) = run(&path, "6\n");
    assert!(out.contains("CURRENT WATCHLIST (2 stocks)"));

    storage::delete_watchlist(&path).unwrap();
}

#[test]
fn discarded_session_leaves_file_untouched() {
    let path = temp_path();
    std::fs::write(&path, "nvda\n\n  amd \n").unwrap();

    let (outcome, _) = run(&path, "3\nyes\n1\nPLTR\n6\n");
    assert_eq!(outcome, SessionOutcome::Discarded);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "nvda\n\n  amd \n");

    let loaded = storage::load_watchlist(&path).unwrap().unwrap();
    let names: Vec<&str> = loaded.iter().map(Ticker::as_str).collect();
    assert_eq!(names, vec!["NVDA", "AMD"]);

    storage::delete_watchlist(&path).unwrap();
}

#[test]
fn clear_then_save_writes_empty_file() {
    let path = temp_path();
    let (outcome, out) = run(&path, "3\nyes\n5\n");
    assert_eq!(outcome, SessionOutcome::Saved { path: path.clone(), count: 0 });
    assert!(out.contains("(0 stocks)"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

    storage::delete_watchlist(&path).unwrap();
}

#[test]
fn reset_restores_defaults_after_edits() {
    let path = temp_path();
    std::fs::write(&path, "PLTR\n").unwrap();

    let (_, _) = run(&path, "4\nyes\n5\n");
    let loaded = storage::load_watchlist(&path).unwrap().unwrap();
    assert_eq!(loaded, Watchlist::default_set());

    storage::delete_watchlist(&path).unwrap();
}

#[test]
fn interrupted_session_does_not_save() {
    let path = temp_path();
    let (outcome, out) = run(&path, "1\nPLTR\n");
    assert_eq!(outcome, SessionOutcome::Interrupted);
    assert!(out.ends_with("[WARNING] Exiting...\n"));
    assert!(!path.exists());
}
