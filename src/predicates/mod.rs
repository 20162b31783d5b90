use walkdir::DirEntry;

pub mod bin_dir;
pub mod marker;

pub use bin_dir::BinDirPredicate;
pub use marker::MarkerFilePredicate;

/// Name of the subdirectory that holds an application's executables.
pub const BIN_DIR: &str = "bin";

/// Strategy that decides whether a walked entry is an application root.
pub trait AppDirPredicate: Send + Sync {
    /// True when `entry` is the root of one application.
    fn is_app_dir(&self, entry: &DirEntry) -> bool;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;
}

