//! Brow - a generative web browser for the terminal
//!
//! Every page is written by a text-generation model in answer to what the
//! user typed. Tabs, history, themes and the copilot are plain data driven
//! by the [`state::update`] reducer; [`dispatcher::Dispatcher`] runs the
//! provider calls it asks for.

pub mod config;
pub mod copilot;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod page;
pub mod provider;
pub mod services;
pub mod speech;
pub mod state;
pub mod tab;
pub mod theme;
pub mod tui;
pub mod widget;

pub use config::BrowConfig;
pub use dispatcher::{Dispatcher, Ticket};
pub use error::{BrowError, FixSuggestion};
pub use history::NavigationHistory;
pub use page::{Answer, GroundingLink, PageContent, PageKind};
pub use provider::{create_provider, Provider};
pub use state::{update, BrowserState, Command, Msg};
pub use tab::{Tab, TabId, TabRegistry, TabStatus};
pub use theme::{Theme, ThemeState};
