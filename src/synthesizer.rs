use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::AppError;
use crate::events::{Event, EventSink, SkipReason, TracingSink};
use crate::fsutil::{replace_symlink, symlink};
use crate::ledger::Ledger;
use crate::model::Application;
use crate::natural::is_newer;
use crate::predicates::BIN_DIR;

/// Keeps one symlink per executable name in the bin root pointing at the
/// newest application that provides it.
pub struct LinkSynthesizer {
    app_root: PathBuf,
    bin_root: PathBuf,
    ledger: Option<Ledger>,
    events: Arc<dyn EventSink>,
}

impl LinkSynthesizer {
    pub fn new(app_root: impl Into<PathBuf>, bin_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            bin_root: bin_root.into(),
            ledger: None,
            events: Arc::new(TracingSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Track link ownership in a ledger kept inside the bin root.
    pub fn with_ledger(mut self) -> Result<Self, AppError> {
        self.ledger = Some(Ledger::load(&self.bin_root)?);
        Ok(self)
    }

    /// Reconcile the link for every executable of `app`.
    ///
    /// Stops at the first failure; links handled before it stay in place.
    pub fn update_links(&mut self, app: Application) -> Result<(), AppError> {
        let mut outcome = Ok(());
        for (name, path) in &app.executables {
            if let Err(err) = self.update_link(&app.name, name, path) {
                outcome = Err(err);
                break;
            }
        }
        let flushed = match self.ledger.as_mut() {
            Some(ledger) => ledger.flush(),
            None => Ok(()),
        };
        // A reconcile failure is reported ahead of a ledger write failure.
        outcome.and(flushed)
    }

    fn update_link(&mut self, owner: &str, name: &str, path: &Path) -> Result<(), AppError> {
        let link = self.bin_root.join(name);
        let target = self.app_root.join(path);

        let metadata = match fs::symlink_metadata(&link) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                symlink(&target, &link).map_err(|err| {
                    AppError::Io(io::Error::new(
                        err.kind(),
                        format!("creating link {} failed: {err}", link.display()),
                    ))
                })?;
                self.record(name, owner, &target);
                self.events.emit(&Event::LinkCreated { name: name.to_string(), target });
                return Ok(());
            }
            Err(err) => return Err(AppError::Io(err)),
        };

        if !metadata.file_type().is_symlink() {
            self.events.emit(&Event::Conflict { path: link.clone() });
            return Err(AppError::Conflict { path: link });
        }

        let existing = fs::read_link(&link)?;
        if existing.as_os_str() == target.as_os_str() {
            self.record(name, owner, &target);
            self.events.emit(&Event::LinkSkipped {
                name: name.to_string(),
                reason: SkipReason::AlreadyCurrent,
            });
            return Ok(());
        }

        let previous_owner = self.existing_owner(name, &existing);
        if previous_owner.is_empty() {
            // Not a link this tool can attribute to any application.
            self.events.emit(&Event::LinkSkipped {
                name: name.to_string(),
                reason: SkipReason::Foreign(existing),
            });
            return Ok(());
        }
        if !is_newer(&previous_owner, owner) {
            self.events.emit(&Event::LinkSkipped {
                name: name.to_string(),
                reason: SkipReason::OwnedBy(previous_owner),
            });
            return Ok(());
        }

        replace_symlink(&self.bin_root, &target, &link)?;
        self.record(name, owner, &target);
        self.events.emit(&Event::LinkReplaced {
            name: name.to_string(),
            target,
            previous_owner,
            owner: owner.to_string(),
        });
        Ok(())
    }

    fn existing_owner(&self, name: &str, existing: &Path) -> String {
        self.ledger
            .as_ref()
            .and_then(|ledger| ledger.owner(name, existing))
            .map(str::to_string)
            .unwrap_or_else(|| owner_from_target(existing))
    }

    fn record(&mut self, name: &str, owner: &str, target: &Path) {
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.record(name, owner, target);
        }
    }
}

/// Application name read back out of a link target: the component just
/// before the last `bin` component. Empty when there is none.
///
/// This depends on targets following the `<app>/bin/<exe>` layout.
pub fn owner_from_target(target: &Path) -> String {
    let parts: Vec<&OsStr> = target
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .map(Component::as_os_str)
        .collect();
    (1..parts.len())
        .rev()
        .find(|&i| parts[i] == BIN_DIR)
        .map(|i| parts[i - 1].to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_component_before_bin() {
        assert_eq!(owner_from_target(Path::new("../apps/foo-2/bin/run")), "foo-2");
        assert_eq!(owner_from_target(Path::new("/opt/apps/foo-2/bin/sub/run")), "foo-2");
    }

    #[test]
    fn last_bin_wins() {
        assert_eq!(owner_from_target(Path::new("bin/tools/bin/run")), "tools");
    }

    #[test]
    fn no_bin_means_empty_owner() {
        assert_eq!(owner_from_target(Path::new("/usr/local/run")), "");
        assert_eq!(owner_from_target(Path::new("bin/run")), "");
    }
}
