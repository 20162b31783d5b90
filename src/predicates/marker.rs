use walkdir::DirEntry;

use super::AppDirPredicate;

/// A directory is an application when it contains a named marker file.
#[derive(Debug, Clone)]
pub struct MarkerFilePredicate {
    marker: String,
}

impl MarkerFilePredicate {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }
}

impl AppDirPredicate for MarkerFilePredicate {
    fn is_app_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry.path().join(&self.marker).metadata().map(|meta| meta.is_file()).unwrap_or(false)
    }

    fn describe(&self) -> String {
        format!("directory containing marker file {:?}", self.marker)
    }
}
