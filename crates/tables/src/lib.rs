//! Field metadata tables.
//!
//! An [`InfoTable`] maps a field name to its optional `type` and `help`
//! strings. It is consulted by the HTML renderer when the `INFO` flag is
//! set, to emit `data-type`/`data-help` attributes alongside a value. The
//! table is built once, sorted by name, and looked up by binary search —
//! the same discipline a line index uses to turn a byte offset into a
//! line/column pair.

#![warn(missing_docs)]

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single entry: a field name plus its optional type and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfoEntry {
    /// Field name, as it appears in a directive's content (e.g. `"in-stock"`).
    pub name: String,
    /// Type hint shown to callers (e.g. `"number"`, `"string"`); optional.
    pub r#type: Option<String>,
    /// Short human-readable description; optional.
    pub help: Option<String>,
}

impl InfoEntry {
    /// Construct an entry with no type/help.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: None,
            help: None,
        }
    }

    /// Attach a type hint.
    #[must_use]
    pub fn with_type(mut self, r#type: impl Into<String>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    /// Attach help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// An immutable, name-sorted table of [`InfoEntry`] values, looked up by
/// binary search.
///
/// Built once via [`InfoTable::new`] (which sorts its input) or incrementally
/// via [`InfoTableBuilder`]; lookups never allocate.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfoTable {
    entries: Vec<InfoEntry>,
}

impl InfoTable {
    /// Build a table from an unsorted list of entries, sorting by name.
    ///
    /// If the same name appears twice, the entry that sorts last after a
    /// stable sort (i.e. the one later in `entries`) wins lookups, since
    /// [`Vec::sort_by`] is stable and [`InfoTable::lookup`] uses
    /// [`slice::binary_search_by`], which may return either match; callers
    /// should not register duplicate names.
    pub fn new(mut entries: Vec<InfoEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by exact name match via binary search.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&InfoEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Iterate the table in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = &InfoEntry> {
        self.entries.iter()
    }
}

/// Incrementally assembles an [`InfoTable`], sorting once on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct InfoTableBuilder {
    entries: Vec<InfoEntry>,
}

impl InfoTableBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one entry.
    #[must_use]
    pub fn entry(mut self, entry: InfoEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Finish, producing a sorted, lookup-ready table.
    #[must_use]
    pub fn build(self) -> InfoTable {
        InfoTable::new(self.entries)
    }
}

/// Ordering helper used by callers that keep their own pre-sorted storage
/// and want to confirm it stays in the order [`InfoTable`] expects.
#[must_use]
pub fn name_order(a: &InfoEntry, b: &InfoEntry) -> Ordering {
    a.name.cmp(&b.name)
}
