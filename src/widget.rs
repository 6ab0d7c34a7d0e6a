//! New-Tab dashboard widgets
//!
//! The widget set is fixed at startup; only the enabled flags change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BrowError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetType {
    Search,
    Shortcuts,
    Weather,
    News,
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Shortcuts => write!(f, "shortcuts"),
            Self::Weather => write!(f, "weather"),
            Self::News => write!(f, "news"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardWidget {
    pub id: String,
    pub widget_type: WidgetType,
    pub enabled: bool,
}

/// Headlines shown by the News widget; selecting one searches for it
pub const NEWS_HEADLINES: [&str; 3] = [
    "AI Breakthroughs in 2025",
    "Global Markets hit record highs",
    "New Space Station module launches",
];

/// What selecting a dashboard shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Search(&'static str),
    /// Open the history panel
    Recents,
}

/// Shortcuts shown by the Shortcuts widget as (label, action)
pub const SHORTCUTS: [(&str, ShortcutAction); 4] = [
    ("Tech News", ShortcutAction::Search("Latest technology news")),
    ("Trending", ShortcutAction::Search("What is trending worldwide today?")),
    ("Design", ShortcutAction::Search("Modern UI/UX design trends 2025")),
    ("Recents", ShortcutAction::Recents),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    widgets: Vec<DashboardWidget>,
}

impl Default for Dashboard {
    fn default() -> Self {
        let widget = |id: &str, widget_type, enabled| DashboardWidget {
            id: id.to_string(),
            widget_type,
            enabled,
        };
        Self {
            widgets: vec![
                widget("w1", WidgetType::Search, true),
                widget("w2", WidgetType::Shortcuts, true),
                widget("w3", WidgetType::Weather, false),
                widget("w4", WidgetType::News, false),
            ],
        }
    }
}

impl Dashboard {
    pub fn widgets(&self) -> &[DashboardWidget] {
        &self.widgets
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| BrowError::UnknownWidget { id: id.to_string() })?;
        widget.enabled = !widget.enabled;
        Ok(widget.enabled)
    }

    pub fn is_enabled(&self, widget_type: WidgetType) -> bool {
        self.widgets
            .iter()
            .any(|w| w.widget_type == widget_type && w.enabled)
    }
}
