//! Sidecar record of which application owns each link.
//!
//! A record is only trusted while the link still points at the target it
//! was written for. Anything else falls back to reading the owner out of
//! the link target itself.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::fsutil::write_atomically;

pub const LEDGER_FILE: &str = ".linkwarp-ledger.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub application: String,
    pub target: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    links: BTreeMap<String, LinkRecord>,
}

#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    links: BTreeMap<String, LinkRecord>,
    dirty: bool,
}

impl Ledger {
    /// Load the ledger kept in `bin_root`. A missing file is an empty
    /// ledger; an unreadable one is logged and ignored.
    pub fn load(bin_root: &Path) -> Result<Self, AppError> {
        let path = bin_root.join(LEDGER_FILE);
        let links = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<LedgerFile>(&contents) {
                Ok(file) => file.links,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "ignoring unreadable ledger: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(AppError::Io(err)),
        };
        Ok(Ledger { path, links, dirty: false })
    }

    /// Owner recorded for `link`, if the record matches `current_target`.
    pub fn owner(&self, link: &str, current_target: &Path) -> Option<&str> {
        self.links
            .get(link)
            .filter(|record| record.target.as_os_str() == current_target.as_os_str())
            .map(|record| record.application.as_str())
    }

    pub fn record(&mut self, link: &str, application: &str, target: &Path) {
        let record = LinkRecord { application: application.to_string(), target: target.to_path_buf() };
        if self.links.get(link) != Some(&record) {
            self.links.insert(link.to_string(), record);
            self.dirty = true;
        }
    }

    pub fn get(&self, link: &str) -> Option<&LinkRecord> {
        self.links.get(link)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the ledger if anything changed since the last flush.
    pub fn flush(&mut self) -> Result<(), AppError> {
        if !self.dirty {
            return Ok(());
        }
        let file = LedgerFile { links: self.links.clone() };
        let contents = serde_json::to_string_pretty(&file)?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        write_atomically(dir, &self.path, contents.as_bytes())?;
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_survive_a_flush_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::load(dir.path()).unwrap();
        assert!(!ledger.is_dirty());
        assert_eq!(ledger.path(), dir.path().join(LEDGER_FILE));

        ledger.record("run", "foo-2", Path::new("../apps/foo-2/bin/run"));
        assert!(ledger.is_dirty());
        ledger.flush().unwrap();
        assert!(!ledger.is_dirty());

        let reloaded = Ledger::load(dir.path()).unwrap();
        assert_eq!(
            reloaded.get("run"),
            Some(&LinkRecord {
                application: "foo-2".into(),
                target: PathBuf::from("../apps/foo-2/bin/run"),
            })
        );
        assert_eq!(reloaded.owner("run", Path::new("../apps/foo-2/bin/run")), Some("foo-2"));
    }

    #[test]
    fn owner_requires_matching_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::load(dir.path()).unwrap();
        ledger.record("run", "foo-2", Path::new("../apps/foo-2/bin/run"));
        assert_eq!(ledger.owner("run", Path::new("/somewhere/else")), None);
        assert_eq!(ledger.owner("stop", Path::new("../apps/foo-2/bin/run")), None);
    }

    #[test]
    fn identical_record_does_not_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::load(dir.path()).unwrap();
        ledger.record("run", "foo-2", Path::new("t"));
        ledger.flush().unwrap();
        ledger.record("run", "foo-2", Path::new("t"));
        assert!(!ledger.is_dirty());
    }
}
