//! Navigation history - per-tab back/forward log
//!
//! Standard browser semantics: navigating from a back-state drops the
//! abandoned forward branch. The log is never empty and the cursor always
//! points at an existing entry.

use crate::error::{BrowError, Result};
use crate::page::PageContent;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationHistory {
    entries: Vec<PageContent>,
    index: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    /// A history holding a single New-Tab entry
    pub fn new() -> Self {
        Self::starting_at(PageContent::new_tab())
    }

    pub fn starting_at(entry: PageContent) -> Self {
        Self {
            entries: vec![entry],
            index: 0,
        }
    }

    /// Truncate everything after the cursor, append `entry` and move onto it
    pub fn navigate(&mut self, entry: PageContent) {
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry; no-op at the start
    pub fn go_back(&mut self) -> Option<&PageContent> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward one entry; no-op at the end
    pub fn go_forward(&mut self) -> Option<&PageContent> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    /// Move the cursor to an arbitrary entry
    pub fn jump_to(&mut self, index: usize) -> Result<&PageContent> {
        if index >= self.entries.len() {
            return Err(BrowError::HistoryIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.index = index;
        Ok(&self.entries[index])
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> &PageContent {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PageContent] {
        &self.entries
    }
}
