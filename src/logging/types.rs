//! Core logging types: summary entries, status, and the [`Log`] trait.

/// Per-entry result for summary reporting.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    /// Entry name as it appears in the config file.
    pub name: String,
    /// Final status of the entry.
    pub status: Status,
    /// Optional detail message (e.g., refusal reason or error description).
    pub message: Option<String>,
}

/// Status of a processed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The entry was reconciled (link created, or moved and linked).
    Ok,
    /// Nothing was done and nothing needs doing (already linked, or the user
    /// declined the move).
    Skipped,
    /// Dry-run mode; the planned action was reported but not applied.
    DryRun,
    /// The entry could not be reconciled.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation; the
/// reconciler and commands only see this trait so they never depend on how
/// messages are formatted.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an entry result for the summary.
    fn record(&self, name: &str, status: Status, message: Option<&str>);
}
