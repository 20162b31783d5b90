use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, DEFAULT_INNER_DEPTH, DEFAULT_MAX_DEPTH};
use crate::error::AppError;
use crate::events::{Event, EventSink, TracingSink};
use crate::model::Application;
use crate::path::{is_excluded, is_hidden};
use crate::predicates::{AppDirPredicate, BIN_DIR, BinDirPredicate};

pub struct ScanOptions {
    pub max_depth: usize,
    pub inner_depth: usize,
    pub allow_nested: bool,
    pub exclude: Option<globset::GlobSet>,
    pub predicate: Box<dyn AppDirPredicate>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            inner_depth: DEFAULT_INNER_DEPTH,
            allow_nested: false,
            exclude: None,
            predicate: Box::new(BinDirPredicate),
        }
    }
}

impl ScanOptions {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(ScanOptions {
            max_depth: config.effective_max_depth(),
            inner_depth: config.inner_depth.max(1),
            allow_nested: config.allow_nested,
            exclude: config.compile_excludes()?,
            predicate: config.predicate(),
        })
    }
}

/// Walks a search root and reports every application directory found.
pub struct AppScanner {
    root: PathBuf,
    options: ScanOptions,
    events: Arc<dyn EventSink>,
}

impl AppScanner {
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self { root: root.into(), options, events: Arc::new(TracingSink) }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Walk the search root, handing each application to `visit`.
    ///
    /// Listing failures in the outer walk skip that branch. Failures while
    /// enumerating an application's `bin/` abort the scan, as does any error
    /// returned by `visit`.
    pub fn start_search<F>(&self, mut visit: F) -> Result<(), AppError>
    where
        F: FnMut(Application) -> Result<(), AppError>,
    {
        let max_depth = if self.options.max_depth == 0 {
            DEFAULT_MAX_DEPTH
        } else {
            self.options.max_depth
        };
        tracing::debug!(
            root = %self.root.display(),
            max_depth,
            predicate = %self.options.predicate.describe(),
            "searching for applications"
        );

        let mut walker = WalkDir::new(&self.root).min_depth(1).max_depth(max_depth).into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("skipping {:?}: {}", err.path(), err);
                    continue;
                }
            };

            if is_excluded(entry.path(), self.options.exclude.as_ref()) {
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if !self.options.predicate.is_app_dir(&entry) {
                continue;
            }

            let app = self.collect_application(&entry)?;
            visit(app).map_err(|err| AppError::Update(Box::new(err)))?;

            if !self.options.allow_nested {
                walker.skip_current_dir();
            }
        }

        Ok(())
    }

    fn collect_application(&self, entry: &DirEntry) -> Result<Application, AppError> {
        let relative = self.relative(entry.path());
        let name = entry.file_name().to_string_lossy().into_owned();
        let mut app = Application::new(name, relative);
        self.events
            .emit(&Event::DiscoveredApplication { name: app.name.clone(), path: app.path.clone() });

        let bin_dir = entry.path().join(BIN_DIR);
        if !bin_dir.is_dir() {
            // Marker-based predicates may accept directories without `bin/`.
            return Ok(app);
        }

        let mut walker =
            WalkDir::new(&bin_dir).min_depth(1).max_depth(self.options.inner_depth.max(1)).into_iter();
        while let Some(found) = walker.next() {
            let found = found?;
            let metadata = found.metadata()?;

            if is_hidden(found.file_name()) {
                if metadata.is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }
            if metadata.is_dir() || !is_executable(&metadata) {
                continue;
            }

            let short_name = found.file_name().to_string_lossy().into_owned();
            let path = self.relative(found.path());
            self.events.emit(&Event::DiscoveredExecutable {
                application: app.name.clone(),
                name: short_name.clone(),
                path: path.clone(),
            });
            app.insert_executable(short_name, path);
        }

        Ok(app)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}
