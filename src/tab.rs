//! Tab registry - ordered tabs, each owning its own navigation history
//!
//! Every tab carries a generation counter that is bumped whenever its
//! current page changes. In-flight requests remember the generation they
//! were issued at; a completion whose generation no longer matches is stale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BrowError, Result};
use crate::history::NavigationHistory;
use crate::page::{PageContent, NEW_TAB_TITLE, NEW_TAB_URL};

/// Id of the tab that exists at startup
pub const FIRST_TAB_ID: &str = "tab-1";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabStatus {
    Idle,
    Loading,
    Complete,
    Error,
}

impl fmt::Display for TabStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Loading => write!(f, "LOADING"),
            Self::Complete => write!(f, "COMPLETE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tab
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    /// Visual URL or query shown in the omnibox
    pub url: String,
    pub status: TabStatus,
    history: NavigationHistory,
    generation: u64,
}

impl Tab {
    pub fn fresh(id: TabId) -> Self {
        Self {
            id,
            title: NEW_TAB_TITLE.to_string(),
            url: NEW_TAB_URL.to_string(),
            status: TabStatus::Idle,
            history: NavigationHistory::new(),
            generation: 0,
        }
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn current(&self) -> &PageContent {
        self.history.current()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a request issued at `generation` may still write into this tab
    pub fn accepts(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Mark the tab as loading and return the generation the request belongs to
    pub fn begin_request(&mut self, url: Option<&str>, title: impl Into<String>) -> u64 {
        self.generation += 1;
        self.status = TabStatus::Loading;
        if let Some(url) = url {
            self.url = url.to_string();
        }
        self.title = title.into();
        self.generation
    }

    /// Append a page and update the chrome around it
    pub fn commit(
        &mut self,
        entry: PageContent,
        url: impl Into<String>,
        title: impl Into<String>,
        status: TabStatus,
    ) {
        self.generation += 1;
        self.history.navigate(entry);
        self.url = url.into();
        self.title = title.into();
        self.status = status;
    }

    pub fn go_back(&mut self) -> bool {
        if self.history.go_back().is_none() {
            return false;
        }
        self.sync_from_current();
        true
    }

    pub fn go_forward(&mut self) -> bool {
        if self.history.go_forward().is_none() {
            return false;
        }
        self.sync_from_current();
        true
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        self.history.jump_to(index)?;
        self.sync_from_current();
        Ok(())
    }

    /// Back to a single New-Tab entry, keeping the id
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::fresh(self.id.clone());
        self.generation = generation;
    }

    fn sync_from_current(&mut self) {
        self.generation += 1;
        let current = self.history.current();
        self.url = current.display_url().to_string();
        self.title = current.display_title().to_string();
        self.status = TabStatus::Complete;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered tabs plus the active tab id; never empty
#[derive(Debug, Clone)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: TabId,
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    pub fn new() -> Self {
        let id = TabId::new(FIRST_TAB_ID);
        Self {
            tabs: vec![Tab::fresh(id.clone())],
            active: id,
        }
    }

    /// Open a new tab at the end and make it active
    pub fn create(&mut self) -> TabId {
        let id = TabId::generate();
        self.tabs.push(Tab::fresh(id.clone()));
        self.active = id.clone();
        id
    }

    /// Close a tab. The last remaining tab is reset instead of removed.
    ///
    /// Returns false when no tab has this id.
    pub fn close(&mut self, id: &TabId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };

        if self.tabs.len() == 1 {
            self.tabs[0].reset();
            return true;
        }

        self.tabs.remove(pos);
        if &self.active == id {
            if let Some(last) = self.tabs.last() {
                self.active = last.id.clone();
            }
        }
        true
    }

    pub fn switch_to(&mut self, id: &TabId) -> Result<()> {
        if self.position(id).is_none() {
            return Err(BrowError::TabNotFound {
                tab_id: id.to_string(),
            });
        }
        self.active = id.clone();
        Ok(())
    }

    /// Id of the tab `offset` positions away from the active one, wrapping
    pub fn cycle(&self, offset: isize) -> TabId {
        let len = self.tabs.len() as isize;
        let pos = self.active_position() as isize;
        let next = (pos + offset).rem_euclid(len) as usize;
        self.tabs[next].id.clone()
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn get_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    pub fn active_id(&self) -> &TabId {
        &self.active
    }

    pub fn active(&self) -> &Tab {
        let pos = self.active_position();
        &self.tabs[pos]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        let pos = self.active_position();
        &mut self.tabs[pos]
    }

    pub fn active_position(&self) -> usize {
        self.position(&self.active).unwrap_or(0)
    }

    pub fn position(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false; the registry keeps at least one tab
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
