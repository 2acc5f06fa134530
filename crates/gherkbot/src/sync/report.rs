//! Per-file outcomes of a synchronisation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "message", rename_all = "snake_case")]
pub enum SyncAction {
    /// A new output was generated.
    Created,
    /// A stale output was regenerated.
    Updated,
    /// An orphaned output was removed.
    Deleted,
    /// The output was already up to date.
    Unchanged,
    /// The source could not be parsed; the output was left untouched.
    Skipped(String),
    /// An I/O operation failed.
    Failed(String),
}

impl SyncAction {
    /// Lowercase label used in console output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Unchanged => "unchanged",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
        }
    }

    /// Detail message for skipped and failed files.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Skipped(message) | Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome for a single output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEntry {
    /// Output path relative to the output root.
    pub path: PathBuf,
    /// Action taken.
    #[serde(flatten)]
    pub action: SyncAction,
}

/// Outcomes of one synchronisation, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// One entry per output path considered.
    pub entries: Vec<SyncEntry>,
}

impl SyncReport {
    pub(super) fn record(&mut self, path: PathBuf, action: SyncAction) {
        self.entries.push(SyncEntry { path, action });
    }

    /// Entries whose action matches `predicate`.
    pub fn matching(
        &self,
        predicate: impl Fn(&SyncAction) -> bool,
    ) -> impl Iterator<Item = &SyncEntry> {
        self.entries
            .iter()
            .filter(move |entry| predicate(&entry.action))
    }

    /// Entries that changed the output tree or need attention.
    pub fn changes(&self) -> impl Iterator<Item = &SyncEntry> {
        self.matching(|action| *action != SyncAction::Unchanged)
    }

    /// Number of entries with the given action label.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.matching(|action| action.label() == label).count()
    }

    /// Return `true` when at least one file operation failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.matching(|action| matches!(action, SyncAction::Failed(_)))
            .next()
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SyncReport {
        let mut report = SyncReport::default();
        report.record(PathBuf::from("a.robot"), SyncAction::Created);
        report.record(PathBuf::from("b.robot"), SyncAction::Unchanged);
        report.record(
            PathBuf::from("c.robot"),
            SyncAction::Skipped("bad syntax".into()),
        );
        report
    }

    #[test]
    fn changes_exclude_unchanged_entries() {
        let report = report();
        let paths: Vec<_> = report.changes().map(|e| e.path.clone()).collect();
        assert_eq!(paths, [PathBuf::from("a.robot"), PathBuf::from("c.robot")]);
        assert_eq!(report.count("unchanged"), 1);
        assert!(!report.has_failures());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "serialisation of plain data cannot fail")]
    fn serialises_flattened_actions() {
        let json = serde_json::to_value(report()).expect("serialise report");
        assert_eq!(
            json,
            serde_json::json!({
                "entries": [
                    { "path": "a.robot", "action": "created" },
                    { "path": "b.robot", "action": "unchanged" },
                    { "path": "c.robot", "action": "skipped", "message": "bad syntax" },
                ]
            })
        );
    }
}
