//! Library entry point for linkwarp: discover applications and keep a
//! shared bin directory of links to their executables.

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod fsutil;
pub mod ledger;
pub mod model;
pub mod natural;
pub mod path;
pub mod predicates;
pub mod scanner;
pub mod synthesizer;

pub use error::AppError;
pub use model::Application;
pub use scanner::{AppScanner, ScanOptions};
pub use synthesizer::LinkSynthesizer;
