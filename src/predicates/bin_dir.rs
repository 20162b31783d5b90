use walkdir::DirEntry;

use super::{AppDirPredicate, BIN_DIR};

/// A directory is an application when it has a `bin` child directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinDirPredicate;

impl AppDirPredicate for BinDirPredicate {
    fn is_app_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        // `bin` itself may be a symlink to a directory.
        entry.path().join(BIN_DIR).metadata().map(|meta| meta.is_dir()).unwrap_or(false)
    }

    fn describe(&self) -> String {
        format!("directory containing {BIN_DIR}/")
    }
}
