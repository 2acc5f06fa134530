//! Helpers for rendering command output.

use std::io::Write;
use std::path::Path;

use eyre::{Context, Result};
use gherkbot::SyncReport;

pub(crate) fn write_script(writer: &mut dyn Write, script: &str) -> Result<()> {
    writer
        .write_all(script.as_bytes())
        .wrap_err("failed to write generated script")
}

pub(crate) fn write_converted(writer: &mut dyn Write, path: &Path) -> Result<()> {
    writeln!(writer, "Converted to: {}", path.display())
        .wrap_err_with(|| format!("failed to report conversion of {}", path.display()))
}

/// Write one line per changed entry, then a completion line.
pub(crate) fn write_sync_report(writer: &mut dyn Write, report: &SyncReport) -> Result<()> {
    for entry in report.changes() {
        let path = entry.path.display();
        let written = match entry.action.message() {
            Some(message) => writeln!(writer, "{} {path}: {message}", entry.action),
            None => writeln!(writer, "{} {path}", entry.action),
        };
        written.wrap_err_with(|| format!("failed to write sync entry for {path}"))?;
    }
    writeln!(writer, "Sync complete.").wrap_err("failed to write sync summary")
}

pub(crate) fn write_sync_report_json(writer: &mut dyn Write, report: &SyncReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .wrap_err("failed to serialize sync report to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use gherkbot::{SyncAction, SyncEntry};

    fn report() -> SyncReport {
        SyncReport {
            entries: vec![
                SyncEntry {
                    path: PathBuf::from("login.robot"),
                    action: SyncAction::Created,
                },
                SyncEntry {
                    path: PathBuf::from("same.robot"),
                    action: SyncAction::Unchanged,
                },
                SyncEntry {
                    path: PathBuf::from("bad.robot"),
                    action: SyncAction::Skipped("invalid gherkin".into()),
                },
            ],
        }
    }

    #[test]
    fn sync_report_lists_changes_then_completion() -> Result<()> {
        let mut buffer = Vec::new();
        write_sync_report(&mut buffer, &report())?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "created login.robot\nskipped bad.robot: invalid gherkin\nSync complete.\n"
        );
        Ok(())
    }

    #[test]
    fn sync_report_json_includes_every_entry() -> Result<()> {
        let mut buffer = Vec::new();
        write_sync_report_json(&mut buffer, &report())?;
        let parsed: serde_json::Value = serde_json::from_slice(&buffer)?;
        let entries = parsed
            .get("entries")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| eyre::eyre!("missing entries array"))?;
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries.first().and_then(|e| e.get("action")),
            Some(&serde_json::Value::String("created".into()))
        );
        Ok(())
    }

    #[test]
    fn converted_line_names_the_file() -> Result<()> {
        let mut buffer = Vec::new();
        write_converted(&mut buffer, Path::new("out/login.robot"))?;
        assert_eq!(String::from_utf8(buffer)?, "Converted to: out/login.robot\n");
        Ok(())
    }
}
