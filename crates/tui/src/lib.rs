//! Terminal UI for the trellis application.
//!
//! This crate hosts the tree editor and the kanban board in a Ratatui
//! terminal interface. The view controllers ([`TreeView`], [`KanbanView`])
//! own the per-view state and drive the pure engines in `trellis_protocol`;
//! the [`App`] maps keyboard input onto them.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Application state shared by both tabs
//! - [`tree_view`]: Tree expansion, flattening, lazy loading, and edits
//! - [`kanban_view`]: Board selection and card edits
//! - [`provider`]: Child providers and user interaction traits
//! - [`dialog`]: Modal prompt and confirmation state
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trellis_config::Config;
//! use trellis_tui::provider::MockChildProvider;
//! use trellis_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let config = Config::default();
//!     let provider = Arc::new(MockChildProvider::new(&config.tree));
//!     let mut app = App::new(config, provider);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod dialog;
pub mod event;
pub mod kanban_view;
pub mod layout;
pub mod provider;
pub mod state;
pub mod terminal;
pub mod tree_view;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::{App, LoadCompletion};
pub use kanban_view::KanbanView;
pub use provider::{
    ChildProvider, Interaction, MockChildProvider, PreparedAnswer, ProviderError,
    ScriptedInteraction, StaticChildProvider,
};
pub use state::{AppState, Grab, Tab};
pub use tree_view::{FlatRow, LoadOutcome, LoadRequest, TreeView};
