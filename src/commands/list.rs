//! Command: list tracked dotfiles with their link status.
use std::io::IsTerminal as _;

use anyhow::Result;

use super::CommandSetup;
use crate::config::record::Record;
use crate::logging::Logger;
use crate::resources::{LinkResource, fs};

/// Column separator.
const GAP: &str = "  ";
/// Narrowest a path column is squeezed to.
const MIN_PATH_WIDTH: usize = 8;

/// Link status of an entry's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// The target is a symlink resolving to the source.
    Linked,
    /// The target is a symlink pointing somewhere else.
    Elsewhere,
    /// The target is not a symlink (or the paths cannot be expanded).
    Unlinked,
}

impl LinkStatus {
    /// Inspect the filesystem for `record`.
    #[must_use]
    pub fn of(record: &Record) -> Self {
        let Ok(link) = LinkResource::from_record(record) else {
            return Self::Unlinked;
        };
        if link.points_to_source() {
            Self::Linked
        } else if fs::is_symlink(&link.target) {
            Self::Elsewhere
        } else {
            Self::Unlinked
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Linked => "yes",
            Self::Elsewhere => "other",
            Self::Unlinked => "no",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Linked => "\x1b[32m",
            Self::Elsewhere => "\x1b[33m",
            Self::Unlinked => "\x1b[31m",
        }
    }
}

/// One table row.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    record: &'a Record,
    status: LinkStatus,
}

impl<'a> Row<'a> {
    /// Build a row with a known status.
    #[must_use]
    pub const fn new(record: &'a Record, status: LinkStatus) -> Self {
        Self { record, status }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Widths {
    name: usize,
    source: usize,
    target: usize,
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn run(setup: &CommandSetup, log: &Logger) -> Result<()> {
    let store = setup.load(log)?;
    if store.is_empty() {
        log.info(&format!(
            "no entries in {}",
            setup.config.path().display()
        ));
        return Ok(());
    }

    let rows: Vec<Row<'_>> = store
        .iter()
        .map(|record| Row::new(record, LinkStatus::of(record)))
        .collect();
    let max_width = terminal_size::terminal_size().map(|(w, _)| usize::from(w.0));
    let color = std::io::stdout().is_terminal();

    for line in render(&rows, max_width, color) {
        println!("{line}");
    }
    Ok(())
}

/// Lay out `rows` as a table, squeezing the path columns to fit `max_width`.
#[must_use]
pub fn render(rows: &[Row<'_>], max_width: Option<usize>, color: bool) -> Vec<String> {
    let widths = column_widths(rows, max_width);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{}{GAP}{}{GAP}{}{GAP}Symlink",
        fit("Name", widths.name),
        fit("Source", widths.source),
        fit("Target", widths.target),
    ));
    for row in rows {
        let status = if color {
            format!("{}{}\x1b[0m", row.status.color(), row.status.label())
        } else {
            row.status.label().to_string()
        };
        lines.push(format!(
            "{}{GAP}{}{GAP}{}{GAP}{status}",
            fit(row.record.name(), widths.name),
            fit(row.record.source(), widths.source),
            fit(row.record.target(), widths.target),
        ));
    }
    lines
}

fn column_widths(rows: &[Row<'_>], max_width: Option<usize>) -> Widths {
    let width_of = |s: &str| s.chars().count();
    let mut widths = Widths {
        name: width_of("Name"),
        source: width_of("Source"),
        target: width_of("Target"),
    };
    for row in rows {
        widths.name = widths.name.max(width_of(row.record.name()));
        widths.source = widths.source.max(width_of(row.record.source()));
        widths.target = widths.target.max(width_of(row.record.target()));
    }

    let Some(max_width) = max_width else {
        return widths;
    };
    let fixed = widths.name + width_of("Symlink") + 3 * GAP.len();
    let available = max_width.saturating_sub(fixed).max(2 * MIN_PATH_WIDTH);
    if widths.source + widths.target > available {
        let target = widths
            .target
            .min((available / 2).max(available.saturating_sub(widths.source)));
        widths.source = widths.source.min(available - target);
        widths.target = target;
    }
    widths
}

/// Pad `s` to `width`, or cut it to `width` ending in `…`.
fn fit(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len <= width {
        format!("{s:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}
