//! Page content - one entry in a tab's history
//!
//! A page is either the local New-Tab dashboard, a generated answer
//! (quick search or deep dive) or an error from the text-generation call.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// URL shown for a tab that displays the New-Tab dashboard
pub const NEW_TAB_URL: &str = "brow://newtab";

/// Title shown for a tab that displays the New-Tab dashboard
pub const NEW_TAB_TITLE: &str = "New Tab";

/// Scheme used for internal pages (never sent to the provider)
pub const INTERNAL_SCHEME: &str = "brow://";

static RELATED_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|\|\|\s*RELATED:").unwrap());

/// Variant tag of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageKind {
    NewTab,
    SearchResult,
    DeepDive,
    Error,
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewTab => write!(f, "New Tab"),
            Self::SearchResult => write!(f, "Quick Answer"),
            Self::DeepDive => write!(f, "Deep Research Report"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A cited source attached to a generated answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

impl GroundingLink {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Hostname of the source, falling back to the raw URI when it does not parse
    pub fn hostname(&self) -> String {
        url::Url::parse(&self.uri)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.uri.clone())
    }
}

/// One immutable history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub kind: PageKind,
    pub query: Option<String>,
    /// Markdown body produced by the model
    pub summary: Option<String>,
    pub grounding_links: Option<Vec<GroundingLink>>,
    pub related_topics: Option<Vec<String>>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PageContent {
    fn empty(kind: PageKind, query: Option<String>) -> Self {
        Self {
            kind,
            query,
            summary: None,
            grounding_links: None,
            related_topics: None,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn new_tab() -> Self {
        Self::empty(PageKind::NewTab, None)
    }

    pub fn search_result(query: impl Into<String>, answer: Answer) -> Self {
        Self::answered(PageKind::SearchResult, query.into(), answer)
    }

    pub fn deep_dive(query: impl Into<String>, answer: Answer) -> Self {
        Self::answered(PageKind::DeepDive, query.into(), answer)
    }

    pub fn error(query: impl Into<String>, message: impl Into<String>) -> Self {
        let mut page = Self::empty(PageKind::Error, Some(query.into()));
        page.summary = Some(String::new());
        page.error = Some(message.into());
        page
    }

    fn answered(kind: PageKind, query: String, answer: Answer) -> Self {
        let mut page = Self::empty(kind, Some(query));
        page.summary = Some(answer.summary);
        page.grounding_links = Some(answer.grounding_links);
        page.related_topics = Some(answer.related_topics);
        page
    }

    /// URL to display in the omnibox for this entry
    pub fn display_url(&self) -> &str {
        self.query.as_deref().unwrap_or(NEW_TAB_URL)
    }

    /// Title to display in the tab strip for this entry
    pub fn display_title(&self) -> &str {
        self.query.as_deref().unwrap_or(NEW_TAB_TITLE)
    }

    pub fn body(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    pub fn links(&self) -> &[GroundingLink] {
        self.grounding_links.as_deref().unwrap_or(&[])
    }

    pub fn topics(&self) -> &[String] {
        self.related_topics.as_deref().unwrap_or(&[])
    }

    /// Whether this page is rendered by the result view (answer or error)
    pub fn is_result(&self) -> bool {
        !matches!(self.kind, PageKind::NewTab)
    }
}

/// Parsed output of a successful generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answer {
    pub summary: String,
    pub grounding_links: Vec<GroundingLink>,
    pub related_topics: Vec<String>,
}

/// Split model output into the Markdown body and its follow-up topics.
///
/// Everything before the first `||| RELATED:` marker is the body; the
/// segment up to the next marker (if any) is a pipe-separated list. Blank
/// topics are dropped.
pub fn split_related_topics(text: &str) -> (String, Vec<String>) {
    let mut parts = RELATED_PATTERN.split(text);
    let summary = parts.next().unwrap_or_default();
    let topics = match parts.next() {
        Some(rest) => rest
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    (summary.trim_end().to_string(), topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_related_topics() {
        let text = "# Rust\n\nA language.\n\n||| RELATED: What is cargo? | Ownership |  Lifetimes ";
        let (summary, topics) = split_related_topics(text);

        assert_eq!(summary, "# Rust\n\nA language.");
        assert_eq!(topics, vec!["What is cargo?", "Ownership", "Lifetimes"]);
    }

    #[test]
    fn test_split_drops_blank_topics() {
        let (_, topics) = split_related_topics("body ||| RELATED: one | | \n |two|");
        assert_eq!(topics, vec!["one", "two"]);
        assert!(topics.iter().all(|t| !t.trim().is_empty()));
    }

    #[test]
    fn test_split_without_marker() {
        let (summary, topics) = split_related_topics("Just text");
        assert_eq!(summary, "Just text");
        assert!(topics.is_empty());
    }

    #[test]
    fn test_split_stops_at_second_marker() {
        let (summary, topics) = split_related_topics("Body ||| RELATED: a | b ||| RELATED: c");
        assert_eq!(summary, "Body");
        assert_eq!(topics, vec!["a", "b"]);
    }

    #[test]
    fn test_split_marker_only() {
        let (summary, topics) = split_related_topics("||| RELATED:");
        assert_eq!(summary, "");
        assert!(topics.is_empty());
    }

    #[test]
    fn test_new_tab_display() {
        let page = PageContent::new_tab();
        assert_eq!(page.kind, PageKind::NewTab);
        assert_eq!(page.display_url(), NEW_TAB_URL);
        assert_eq!(page.display_title(), NEW_TAB_TITLE);
        assert!(!page.is_result());
    }

    #[test]
    fn test_error_page_carries_message() {
        let page = PageContent::error("rust", "quota exceeded");
        assert_eq!(page.kind, PageKind::Error);
        assert_eq!(page.error.as_deref(), Some("quota exceeded"));
        assert_eq!(page.display_url(), "rust");
        assert!(page.is_result());
    }

    #[test]
    fn test_grounding_hostname() {
        let link = GroundingLink::new("https://doc.rust-lang.org/book/", "The Book");
        assert_eq!(link.hostname(), "doc.rust-lang.org");

        let bad = GroundingLink::new("not a url", "x");
        assert_eq!(bad.hostname(), "not a url");
    }
}
