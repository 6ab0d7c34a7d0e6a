//! Content dispatcher - routes navigations and runs side effects
//!
//! The reducer in [`crate::state`] never performs I/O. It returns a
//! [`Command`]; the [`Dispatcher`] turns each command into one spawned task
//! whose outcome comes back to the UI loop as a [`Msg`] over an mpsc channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::page::{Answer, INTERNAL_SCHEME, NEW_TAB_URL};
use crate::provider::Provider;
use crate::services;
use crate::speech::SpeechCapability;
use crate::state::{Command, Msg};
use crate::tab::TabId;

/// Identifies the tab state a request was issued against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub tab_id: TabId,
    pub generation: u64,
}

impl Ticket {
    pub fn new(tab_id: TabId, generation: u64) -> Self {
        Self { tab_id, generation }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    DeepDive,
}

/// One page request bound for the provider
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRequest {
    pub ticket: Ticket,
    pub kind: RequestKind,
    pub query: String,
}

/// Result of a page request, applied by the reducer if still current
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub request: NavigationRequest,
    pub outcome: Result<Answer, String>,
}

/// Where omnibox input should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Blank input, nothing happens
    Ignore,
    /// Local New-Tab page, no external call
    NewTab,
    /// Any other internal URL; not navigable
    Internal(String),
    /// Smart search for the trimmed query
    Search(String),
}

pub fn route(input: &str) -> Route {
    let input = input.trim();
    if input.is_empty() {
        Route::Ignore
    } else if input == NEW_TAB_URL {
        Route::NewTab
    } else if input.starts_with(INTERNAL_SCHEME) {
        Route::Internal(input.to_string())
    } else {
        Route::Search(input.to_string())
    }
}

/// Visual URL of a finished deep dive
pub fn deep_dive_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    // Path segment: spaces as %20, not '+'
    format!("{}deep-dive/{}", INTERNAL_SCHEME, encoded.replace('+', "%20"))
}

/// Run one page request against the provider
pub async fn resolve(provider: &dyn Provider, request: NavigationRequest) -> Completion {
    let result = match request.kind {
        RequestKind::Search => services::smart_search(provider, &request.query).await,
        RequestKind::DeepDive => services::deep_research(provider, &request.query).await,
    };

    Completion {
        outcome: result.map_err(|e| format!("{:#}", e)),
        request,
    }
}

/// Executes commands on the tokio runtime and reports back over a channel
pub struct Dispatcher {
    provider: Arc<dyn Provider>,
    speech: SpeechCapability,
    tx: mpsc::UnboundedSender<Msg>,
}

impl Dispatcher {
    pub fn new(
        provider: Arc<dyn Provider>,
        speech: SpeechCapability,
        tx: mpsc::UnboundedSender<Msg>,
    ) -> Self {
        Self {
            provider,
            speech,
            tx,
        }
    }

    pub fn speech_available(&self) -> bool {
        self.speech.is_available()
    }

    /// Start the side effects a command describes. Returns false on `Quit`.
    pub fn execute(&self, command: Command) -> bool {
        match command {
            Command::None => {}
            Command::Quit => return false,
            Command::Fetch(request) => {
                info!(
                    tab = %request.ticket.tab_id,
                    generation = request.ticket.generation,
                    kind = ?request.kind,
                    "Dispatching page request"
                );
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    Msg::PageLoaded(resolve(provider.as_ref(), request).await)
                });
            }
            Command::Summarize { ticket, text } => {
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let text = services::summarize(provider.as_ref(), &text).await;
                    Msg::SummaryLoaded { ticket, text }
                });
            }
            Command::AskCopilot { history, context } => {
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let reply = services::copilot_reply(provider.as_ref(), &history, &context).await;
                    Msg::CopilotReplied(reply)
                });
            }
            Command::Listen => {
                let speech = self.speech.clone();
                self.spawn(async move {
                    match speech.listen().await {
                        Ok(transcript) => Msg::Transcript(transcript),
                        Err(e) => Msg::SpeechFailed(e.to_string()),
                    }
                });
            }
        }
        true
    }

    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = Msg> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = task.await;
            if tx.send(msg).is_err() {
                debug!("UI loop gone, dropping completion");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use std::time::Duration;

    fn request(kind: RequestKind, query: &str) -> NavigationRequest {
        NavigationRequest {
            ticket: Ticket::new(TabId::new("tab-1"), 1),
            kind,
            query: query.to_string(),
        }
    }

    #[test]
    fn test_route() {
        assert_eq!(route("   "), Route::Ignore);
        assert_eq!(route(""), Route::Ignore);
        assert_eq!(route(" brow://newtab "), Route::NewTab);
        assert_eq!(
            route("brow://deep-dive/x"),
            Route::Internal("brow://deep-dive/x".into())
        );
        assert_eq!(route("  rust traits "), Route::Search("rust traits".into()));
    }

    #[test]
    fn test_deep_dive_url_encoding() {
        assert_eq!(
            deep_dive_url("rust & c++"),
            "brow://deep-dive/rust%20%26%20c%2B%2B"
        );
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let provider = MockProvider::new().with_default("Body ||| RELATED: a");
        let completion = resolve(&provider, request(RequestKind::Search, "q")).await;
        let answer = completion.outcome.unwrap();
        assert_eq!(answer.summary, "Body");
        assert_eq!(answer.related_topics, vec!["a"]);
    }

    #[tokio::test]
    async fn test_resolve_failure_keeps_message() {
        let provider = MockProvider::new();
        provider.queue_failure("API key not valid");
        let completion = resolve(&provider, request(RequestKind::DeepDive, "q")).await;
        assert_eq!(completion.outcome.unwrap_err(), "API key not valid");
        assert_eq!(completion.request.kind, RequestKind::DeepDive);
    }

    #[tokio::test]
    async fn test_execute_fetch_reports_over_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let provider = Arc::new(MockProvider::new().with_delay(Duration::from_millis(5)));
        let dispatcher = Dispatcher::new(provider.clone(), SpeechCapability::Unsupported, tx);

        assert!(dispatcher.execute(Command::Fetch(request(RequestKind::Search, "q"))));

        let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(msg, Msg::PageLoaded(ref c) if c.outcome.is_ok()));
        assert_eq!(provider.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_listen_unsupported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(
            Arc::new(MockProvider::new()),
            SpeechCapability::Unsupported,
            tx,
        );

        dispatcher.execute(Command::Listen);
        match rx.recv().await.unwrap() {
            Msg::SpeechFailed(message) => assert!(message.contains("not supported")),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_quit() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(
            Arc::new(MockProvider::new()),
            SpeechCapability::Unsupported,
            tx,
        );
        assert!(!dispatcher.execute(Command::Quit));
        assert!(dispatcher.execute(Command::None));
    }
}
