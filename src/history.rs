//  _  __               ____                __  _
// | |/ /  ___  _   _  / ___| _ __   __ _  / _|| |_   ___  _ __
// | ' /  / _ \| | | || |    | '__| / _` || |_ | __| / _ \| '__|
// | . \ |  __/| |_| || |___ | |   | (_| ||  _|| |_ |  __/| |
// |_|\_\ \___| \__, | \____||_|    \__,_||_|   \__| \___||_|
//              |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Generation history

use chrono::{DateTime, Local};

use crate::passgen::{GenerationOptions, Password};
use crate::rating::{SecurityRating, rating_for};

pub const DEFAULT_DISPLAY_LIMIT: usize = 7;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub password: Password,
    pub options: GenerationOptions,
    pub created_at: DateTime<Local>,
}

impl HistoryEntry {
    /// Rating of the configuration this entry was generated with.
    pub fn rating(&self) -> SecurityRating {
        rating_for(&self.options, self.password.len())
    }
}

/// Every password generated this session, most recent first.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    display_limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_LIMIT)
    }
}

impl History {
    pub fn new(display_limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            display_limit: display_limit.max(1),
        }
    }

    pub fn record(&mut self, password: Password, options: GenerationOptions) -> &HistoryEntry {
        self.entries.insert(
            0,
            HistoryEntry {
                password,
                options,
                created_at: Local::now(),
            },
        );
        &self.entries[0]
    }

    /// The newest entries, truncated to the display limit.
    pub fn visible(&self) -> &[HistoryEntry] {
        let shown = self.entries.len().min(self.display_limit);
        &self.entries[..shown]
    }

    pub fn visible_passwords(&self) -> impl Iterator<Item = &Password> {
        self.visible().iter().map(|entry| &entry.password)
    }

    /// Entry at a 0-based position of the visible list.
    pub fn visible_entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.visible().get(index)
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }
}
