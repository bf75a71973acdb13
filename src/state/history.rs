//! Plot History
//! The last few successfully plotted functions, oldest first.

use chrono::{DateTime, Local};

/// How many entries are kept.
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub x_min: f64,
    pub x_max: f64,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Wall-clock time shown next to the entry.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new history with `entry` appended.
    ///
    /// Nothing is added when the newest entry already has the same
    /// expression. Only the last `HISTORY_LIMIT` entries survive.
    pub fn with_entry(&self, entry: HistoryEntry) -> Self {
        if self
            .entries
            .last()
            .is_some_and(|last| last.expression == entry.expression)
        {
            return self.clone();
        }

        let skip = (self.entries.len() + 1).saturating_sub(HISTORY_LIMIT);
        let mut entries: Vec<HistoryEntry> = self.entries.iter().skip(skip).cloned().collect();
        entries.push(entry);
        Self { entries }
    }

    /// Oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
