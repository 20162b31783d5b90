use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One application directory discovered under the search root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Base name of the directory; the comparison key for link ownership.
    pub name: String,
    /// Directory path relative to the search root.
    pub path: PathBuf,
    /// Executable short name to its path relative to the search root.
    pub executables: BTreeMap<String, PathBuf>,
}

impl Application {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Application { name: name.into(), path: path.into(), executables: BTreeMap::new() }
    }

    /// Later finds with the same short name replace earlier ones.
    pub fn insert_executable(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.executables.insert(name.into(), path.into());
    }

    pub fn executable(&self, name: &str) -> Option<&Path> {
        self.executables.get(name).map(PathBuf::as_path)
    }
}
