//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::{IsTerminal as _, Write as _};
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target used for stage headers.
const STAGE_TARGET: &str = "dotlink::stage";
/// Target used for dry-run messages.
const DRY_RUN_TARGET: &str = "dotlink::dry_run";

/// Message severity as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl Severity {
    const fn from_level(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Console label and ANSI colour for this severity.
    const fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Error => ("ERROR", "\x1b[31m"),
            Self::Warn => ("WARN ", "\x1b[33m"),
            Self::Info => ("", ""),
            Self::Debug => ("", "\x1b[2m"),
        }
    }

    /// Tag written to the log file.
    const fn file_tag(self) -> &'static str {
        match self {
            Self::Error => "[error] ",
            Self::Warn => "[warn] ",
            Self::Info => "",
            Self::Debug => "[debug] ",
        }
    }
}

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log directory, truncate the log file for `command` with a
    /// run header, and return a layer appending to it.
    ///
    /// Returns `None` if the directory or file cannot be created.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let header = format!(
            "==========================================\n\
             dotlink {version} {command} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let severity = Severity::from_level(*metadata.level());

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (severity, metadata.target()) {
            (Severity::Info, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
            (Severity::Info, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {msg}"),
            _ => format!("[{ts}]     {}{msg}", severity.file_tag()),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits dotlink-style
/// console output.
struct DotlinkFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for DotlinkFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let severity = Severity::from_level(*metadata.level());

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);

        let (label, color) = severity.style();
        let line = match (severity, metadata.target()) {
            (Severity::Info, STAGE_TARGET) => {
                format!("\x1b[1;34m==>\x1b[0m \x1b[1m{}\x1b[0m", extractor.message)
            }
            (Severity::Info, DRY_RUN_TARGET) => {
                format!("  \x1b[33m[DRY RUN]\x1b[0m {}", extractor.message)
            }
            (Severity::Error | Severity::Warn, _) => {
                format!("{color}{label}\x1b[0m {}", extractor.message)
            }
            (Severity::Info, _) => format!("  {}", extractor.message),
            (Severity::Debug, _) => format!("  {color}{}\x1b[0m", extractor.message),
        };

        if writer.has_ansi_escapes() {
            writeln!(writer, "{line}")
        } else {
            writeln!(writer, "{}", strip_ansi(&line))
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stderr for warnings and errors and to stdout for
/// everything else; colours are used only when the terminal supports them.
/// All events, including `debug`, are also written to
/// `$XDG_CACHE_HOME/dotlink/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(DotlinkFormatter)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
