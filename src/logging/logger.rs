//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{Log, Status, SummaryEntry};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Messages go through [`tracing`]; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) prints them and
/// appends them to `$XDG_CACHE_HOME/dotlink/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<SummaryEntry>>,
    log_file: PathBuf,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path.
    #[must_use]
    pub const fn log_path(&self) -> &PathBuf {
        &self.log_file
    }

    /// Return a clone of all recorded summary entries.
    #[must_use]
    pub fn entries(&self) -> Vec<SummaryEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotlink::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotlink::dry_run", "{msg}");
    }

    /// Record an entry result for the summary.
    pub fn record(&self, name: &str, status: Status, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(SummaryEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded entry has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed entries.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.lock().map_or(0, |guard| {
            guard.iter().filter(|t| t.status == Status::Failed).count()
        })
    }

    /// Print the summary of all recorded entries.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                Status::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                Status::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                Status::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                Status::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + skipped + dry_run + failed;
        self.info(&format!(
            "{total} entries: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \
             \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));
        self.info(&format!("\x1b[2mlog: {}\x1b[0m", self.log_file.display()));
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record(&self, name: &str, status: Status, message: Option<&str>) {
        self.record(name, status, message);
    }
}
