//! In-memory, ordered collection of [`Record`]s for one command invocation.
use crate::error::StoreError;

use super::record::Record;

/// Ordered collection of dotfile entries.
///
/// Insertion order is preserved until [`sort_by_name`](Self::sort_by_name) is
/// called. Names are not required to be unique; lookups return the first
/// match. Indices are only meaningful within the session that produced them.
///
/// # Examples
///
/// ```
/// use dotlink_cli::config::record::Record;
/// use dotlink_cli::config::store::EntryStore;
///
/// let mut store = EntryStore::new();
/// store.push(Record::new("zsh", "~/dots/zshrc", "~/.zshrc").unwrap());
/// store.push(Record::new("git", "~/dots/gitconfig", "~/.gitconfig").unwrap());
/// store.sort_by_name().unwrap();
/// assert_eq!(store.find_by_name("git").unwrap(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    records: Vec<Record>,
}

impl EntryStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove and return the record at `index`, shifting later records down.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] if `index` is past the end; the
    /// store is left unchanged.
    pub fn delete_at(&mut self, index: usize) -> Result<Record, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Index of the first record whose name equals `name` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that name.
    pub fn find_by_name(&self, name: &str) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.name() == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Stable ascending sort by name, using byte-wise string ordering.
    ///
    /// Sorting an empty store is an error rather than a no-op; callers that
    /// may legitimately hold zero entries must check [`is_empty`](Self::is_empty)
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Empty`] if the store has no records.
    pub fn sort_by_name(&mut self) -> Result<(), StoreError> {
        if self.records.is_empty() {
            return Err(StoreError::Empty);
        }
        // `sort_by` is stable: equal names keep their relative order.
        self.records.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(())
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Mutable record at `index`, for in-place edits.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// All records in their current order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl From<Vec<Record>> for EntryStore {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
