use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::events::{Tally, TallySnapshot};
use crate::path::{Roots, display_path};
use crate::scanner::{AppScanner, ScanOptions};
use crate::synthesizer::LinkSynthesizer;

pub struct SyncOptions {
    pub roots: Roots,
}

pub fn execute_sync(options: SyncOptions) -> Result<TallySnapshot, AppError> {
    let config = Config::load()?;
    let roots = options.roots;
    if !roots.search.is_dir() {
        tracing::warn!(root = %display_path(&roots.search), "search root is not a directory");
    }

    let tally = Arc::new(Tally::new());
    let scanner = AppScanner::new(&roots.search, ScanOptions::from_config(&config)?)
        .with_events(tally.clone());
    let mut synthesizer =
        LinkSynthesizer::new(&roots.app, &roots.bin).with_events(tally.clone());
    if config.ledger {
        synthesizer = synthesizer.with_ledger()?;
    }

    scanner.start_search(|app| synthesizer.update_links(app))?;

    let summary = tally.snapshot();
    println!(
        "Processed {} application(s): {} created, {} replaced, {} unchanged.",
        summary.applications,
        summary.created,
        summary.replaced,
        summary.unchanged
    );
    Ok(summary)
}
