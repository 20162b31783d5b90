use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error type for linkwarp.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to enumerate executables: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("something existed at {} and wasn't a symlink; refusing to touch it", path.display())]
    Conflict { path: PathBuf },

    #[error("error during update: {0}")]
    Update(#[source] Box<AppError>),

    #[error("could not find a free temporary name in {}", dir.display())]
    TempExhausted { dir: PathBuf },

    #[error("Failed to write link ledger: {0}")]
    Ledger(#[from] serde_json::Error),

    #[error("cannot find self: {0}")]
    SelfLocate(String),

    #[error("incorrect usage: {0}")]
    Usage(String),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }

    /// Process exit code reported by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::SelfLocate(_) => 26,
            AppError::Usage(_) => 27,
            _ => 25,
        }
    }
}
