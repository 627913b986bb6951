//! Terminal and filesystem stand-ins for the browser's dialogs, button and
//! download.

use seq_core::prompt::UserPrompt;
use seq_report::{ReportError, ReportSink, TriggerControl};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// Alerts go to stderr; confirmations are answered by `auto_accept`.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePrompt {
    pub auto_accept: bool,
}

impl UserPrompt for ConsolePrompt {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        eprintln!("{}", message);
        if self.auto_accept {
            eprintln!("(accepted with --yes)");
        } else {
            eprintln!("(declined, pass --yes to accept)");
        }
        self.auto_accept
    }
}

/// A trigger that only logs its state changes.
pub struct ConsoleTrigger {
    disabled: Cell<bool>,
    label: RefCell<String>,
}

impl ConsoleTrigger {
    pub fn new(label: &str) -> Self {
        Self {
            disabled: Cell::new(false),
            label: RefCell::new(label.to_string()),
        }
    }
}

impl TriggerControl for ConsoleTrigger {
    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        log::info!("{}", label);
        *self.label.borrow_mut() = label.to_string();
    }
}

/// Writes the report into a directory, creating it if needed.
pub struct FileSink {
    dir: PathBuf,
    written: RefCell<Option<PathBuf>>,
}

impl FileSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: RefCell::new(None),
        }
    }

    /// Path of the last file written.
    pub fn written(&self) -> Option<PathBuf> {
        self.written.borrow().clone()
    }
}

impl ReportSink for FileSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> seq_report::Result<()> {
        let path = self.dir.join(file_name);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, bytes))
            .map_err(|e| ReportError::Save(format!("{}: {}", path.display(), e)))?;
        *self.written.borrow_mut() = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_creates_directory() {
        let dir = std::env::temp_dir().join(format!("seq-cmd-sink-{}", std::process::id()));
        let sink = FileSink::new(dir.join("nested"));

        sink.save("report.pdf", b"%PDF-1.3").unwrap();

        let written = sink.written().unwrap();
        assert_eq!(std::fs::read(&written).unwrap(), b"%PDF-1.3");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_prompt_answers_with_flag() {
        assert!(ConsolePrompt { auto_accept: true }.confirm("go?"));
        assert!(!ConsolePrompt { auto_accept: false }.confirm("go?"));
    }
}
