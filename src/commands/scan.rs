use std::path::PathBuf;

use crate::config::Config;
use crate::error::AppError;
use crate::model::Application;
use crate::path::display_path;
use crate::scanner::{AppScanner, ScanOptions};

pub struct ScanRequest {
    pub root: PathBuf,
    pub verbose: bool,
}

/// Discover applications without touching any links.
pub fn execute_scan(options: ScanRequest) -> Result<Vec<Application>, AppError> {
    let config = Config::load()?;
    let scanner = AppScanner::new(&options.root, ScanOptions::from_config(&config)?);

    let mut found = Vec::new();
    scanner.start_search(|app| {
        found.push(app);
        Ok(())
    })?;

    print_report(&found, &options);
    Ok(found)
}

fn print_report(apps: &[Application], options: &ScanRequest) {
    println!("Applications under {}:", display_path(&options.root));
    for app in apps {
        println!(
            "- {:<24} {} executable(s)  {}",
            app.name,
            app.executables.len(),
            app.path.display()
        );
        if options.verbose {
            for (name, path) in &app.executables {
                println!("    • {:<20} {}", name, path.display());
            }
        }
    }
    println!("Total applications: {}", apps.len());
}
