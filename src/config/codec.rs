//! Text format of the config file.
//!
//! One record per line, three comma-separated fields:
//!
//! ```text
//! name,source,target
//! ```
//!
//! Blank lines are ignored and a trailing `\r` is tolerated. Fields are taken
//! verbatim; no trimming or quoting is applied.
use crate::error::{ParseError, ParseErrorKind};

use super::record::{FIELD_COUNT, Record};
use super::store::EntryStore;

/// Separator between the fields of one record.
pub const FIELD_DELIMITER: char = ',';
/// Terminator after every record.
pub const RECORD_DELIMITER: char = '\n';

/// Parse config text into an [`EntryStore`], preserving file order.
///
/// Any malformed line aborts the whole decode; a partial store is never
/// returned.
///
/// # Examples
///
/// ```
/// use dotlink_cli::config::codec::decode;
///
/// let store = decode("vim,~/dots/vimrc,~/.vimrc\n").unwrap();
/// assert_eq!(store.len(), 1);
/// assert!(decode("vim,~/dots/vimrc\n").is_err());
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] naming the first malformed line.
pub fn decode(text: &str) -> Result<EntryStore, ParseError> {
    let mut store = EntryStore::new();
    for (index, line) in text.split(RECORD_DELIMITER).enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        let record = decode_line(line).map_err(|kind| ParseError {
            line: index + 1,
            kind,
        })?;
        store.push(record);
    }
    Ok(store)
}

fn decode_line(line: &str) -> Result<Record, ParseErrorKind> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    // An empty field is reported before the field count so that `a,b,c,`
    // reads as delimiter noise rather than a fourth column.
    if let Some(pos) = fields.iter().position(|f| f.is_empty()) {
        return Err(ParseErrorKind::EmptyField { field: pos + 1 });
    }

    let [name, source, target] = fields.as_slice() else {
        return Err(ParseErrorKind::WrongArity {
            found: fields.len(),
        });
    };

    Ok(Record::new(*name, *source, *target)?)
}

/// Render an [`EntryStore`] as config text, sorted by name.
///
/// The sort is stable and operates on references, so the store itself is not
/// reordered. Every record, including the last, is followed by a newline.
/// Encoding is idempotent: `encode(&decode(&encode(s))?) == encode(s)`.
#[must_use]
pub fn encode(store: &EntryStore) -> String {
    let mut sorted: Vec<&Record> = store.iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    let capacity = sorted
        .iter()
        .map(|r| r.name().len() + r.source().len() + r.target().len() + FIELD_COUNT)
        .sum();
    let mut out = String::with_capacity(capacity);
    for record in sorted {
        out.push_str(record.name());
        out.push(FIELD_DELIMITER);
        out.push_str(record.source());
        out.push(FIELD_DELIMITER);
        out.push_str(record.target());
        out.push(RECORD_DELIMITER);
    }
    out
}
