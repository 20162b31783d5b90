//! Structured events emitted while scanning and reconciling links.
//!
//! The core never prints. Callers decide whether events become log lines,
//! a summary, or assertions in a test.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The link already points at the desired target.
    AlreadyCurrent,
    /// The current owner sorts equal to or after the candidate.
    OwnedBy(String),
    /// The link points somewhere no application can be recovered from.
    Foreign(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DiscoveredApplication { name: String, path: PathBuf },
    DiscoveredExecutable { application: String, name: String, path: PathBuf },
    LinkCreated { name: String, target: PathBuf },
    LinkReplaced { name: String, target: PathBuf, previous_owner: String, owner: String },
    LinkSkipped { name: String, reason: SkipReason },
    Conflict { path: PathBuf },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &Event);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &Event) {
        match event {
            Event::DiscoveredApplication { name, path } => {
                tracing::debug!(application = %name, path = %path.display(), "application found");
            }
            Event::DiscoveredExecutable { application, name, path } => {
                tracing::debug!(%application, executable = %name, path = %path.display(), "executable found");
            }
            Event::LinkCreated { name, target } => {
                tracing::info!(link = %name, target = %target.display(), "created link");
            }
            Event::LinkReplaced { name, target, previous_owner, owner } => {
                tracing::info!(
                    link = %name,
                    target = %target.display(),
                    "updating link: {owner:?} looked newer than {previous_owner:?}"
                );
            }
            Event::LinkSkipped { name, reason: SkipReason::AlreadyCurrent } => {
                tracing::trace!(link = %name, "link already current");
            }
            Event::LinkSkipped { name, reason: SkipReason::OwnedBy(owner) } => {
                tracing::debug!(link = %name, "leaving link: {owner:?} is as new or newer");
            }
            Event::LinkSkipped { name, reason: SkipReason::Foreign(existing) } => {
                tracing::info!(
                    link = %name,
                    existing = %existing.display(),
                    "leaving link: it does not belong to any application"
                );
            }
            Event::Conflict { path } => {
                tracing::warn!(path = %path.display(), "non-symlink occupies link slot");
            }
        }
    }
}

/// Records events in memory.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Counts outcomes for the end-of-run summary and forwards to tracing.
#[derive(Debug, Default)]
pub struct Tally {
    applications: AtomicUsize,
    created: AtomicUsize,
    replaced: AtomicUsize,
    unchanged: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TallySnapshot {
    pub applications: usize,
    pub created: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            applications: self.applications.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            replaced: self.replaced.load(Ordering::Relaxed),
            unchanged: self.unchanged.load(Ordering::Relaxed),
        }
    }
}

impl EventSink for Tally {
    fn emit(&self, event: &Event) {
        let counter = match event {
            Event::DiscoveredApplication { .. } => Some(&self.applications),
            Event::LinkCreated { .. } => Some(&self.created),
            Event::LinkReplaced { .. } => Some(&self.replaced),
            Event::LinkSkipped { .. } => Some(&self.unchanged),
            Event::DiscoveredExecutable { .. } | Event::Conflict { .. } => None,
        };
        if let Some(counter) = counter {
            counter.fetch_add(1, Ordering::Relaxed);
        }
        TracingSink.emit(event);
    }
}
