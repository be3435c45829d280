//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: it maps messages onto the view controllers, runs
//! lazy child fetches in the background, and renders both tabs.

use std::fmt;
use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use trellis_config::Config;
use trellis_protocol::dummy::{initial_forest, initial_kanban};
use trellis_protocol::{DragEnd, Message, TreeDrop, TreeNode};

use crate::{
    AppState, Grab, Tab,
    dialog::{Dialog, PendingAction},
    event::{event_to_message, poll_event},
    kanban_view::{NEW_CARD_PROMPT, RENAME_CARD_PROMPT},
    layout::{HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, STATUS_BAR_HEIGHT},
    provider::{ChildProvider, PreparedAnswer, ProviderError},
    terminal::AppTerminal,
    tree_view::{
        EDIT_NODE_PROMPT, LoadOutcome, LoadRequest, NEW_NODE_PROMPT, TreeView, delete_confirmation,
    },
    widgets::{render_board, render_dialog, render_help_overlay, render_status_bar, render_tree},
};

/// A finished child fetch, as reported by its background task.
#[derive(Debug)]
pub struct LoadCompletion {
    /// The fetch that was started.
    pub request: LoadRequest,
    /// What the provider returned.
    pub result: Result<Vec<TreeNode>, ProviderError>,
}

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Whether the header was shown in the last render.
    header_visible: bool,
    /// The application configuration.
    config: Config,
    provider: Arc<dyn ChildProvider>,
    /// Fetches started by the last updates, not yet spawned.
    pending_loads: Vec<LoadRequest>,
    loads_tx: mpsc::UnboundedSender<LoadCompletion>,
    loads_rx: mpsc::UnboundedReceiver<LoadCompletion>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("should_quit", &self.should_quit)
            .field("header_visible", &self.header_visible)
            .field("config", &self.config)
            .field("pending_loads", &self.pending_loads)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates the application with the seed tree and board.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use trellis_config::Config;
    /// use trellis_tui::App;
    /// use trellis_tui::provider::MockChildProvider;
    ///
    /// let config = Config::default();
    /// let provider = Arc::new(MockChildProvider::new(&config.tree));
    /// let app = App::new(config, provider);
    /// assert_eq!(app.state().forest.len(), 3);
    /// ```
    #[must_use]
    pub fn new(config: Config, provider: Arc<dyn ChildProvider>) -> Self {
        Self::with_state(
            config,
            provider,
            AppState::new(initial_forest(), initial_kanban()),
        )
    }

    /// Creates the application around an existing state.
    #[must_use]
    pub fn with_state(config: Config, provider: Arc<dyn ChildProvider>, state: AppState) -> Self {
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();
        Self {
            state,
            should_quit: false,
            header_visible: true,
            config,
            provider,
            pending_loads: Vec::new(),
            loads_tx,
            loads_rx,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns whether a quit was requested.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Fetches started but not yet handed to the runtime.
    #[must_use]
    pub fn pending_loads(&self) -> &[LoadRequest] {
        &self.pending_loads
    }

    /// Updates the application state based on a message.
    ///
    /// An open dialog captures every message except `Quit`. When the help
    /// overlay is visible, any other message dismisses it instead of
    /// running its normal action.
    pub fn update(&mut self, msg: Message) {
        if self.state.dialog.is_some() {
            self.update_dialog(msg);
            return;
        }

        // When help is visible, most keys should dismiss it
        if self.state.help_visible {
            match msg {
                Message::Quit => {
                    self.should_quit = true;
                }
                Message::ToggleHelp | Message::Escape => {
                    self.state.toggle_help();
                }
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        match msg {
            Message::Quit => {
                self.should_quit = true;
            }
            Message::Escape => {
                if self.state.cancel_grab() {
                    self.state.set_status("Move cancelled");
                } else {
                    self.state.status = None;
                }
            }
            Message::SwitchTab => self.state.switch_tab(),
            Message::ToggleHelp => self.state.toggle_help(),
            Message::NavigateUp => self.navigate_vertical(-1),
            Message::NavigateDown => self.navigate_vertical(1),
            Message::NavigateLeft => match self.state.tab {
                Tab::Tree => self.state.tree_view.navigate_left(&self.state.forest),
                Tab::Kanban => self.state.kanban_view.navigate_left(&self.state.kanban),
            },
            Message::NavigateRight => match self.state.tab {
                Tab::Tree => {
                    let request = self.state.tree_view.navigate_right(&mut self.state.forest);
                    self.queue_load(request);
                }
                Tab::Kanban => self.state.kanban_view.navigate_right(&self.state.kanban),
            },
            Message::ToggleExpand => self.toggle_selected(),
            Message::Grab => {
                if self.state.grab_selected() {
                    self.state.status = None;
                } else {
                    self.state.set_status("Nothing to move here");
                }
            }
            Message::Drop { cross_level } => self.drop_grabbed(cross_level),
            Message::AddItem => self.open_add_dialog(),
            Message::EditItem => self.open_edit_dialog(),
            Message::DeleteItem => self.delete_selected(),
            // Dialog messages without an open dialog
            _ => {}
        }
    }

    fn update_dialog(&mut self, msg: Message) {
        let Some(dialog) = self.state.dialog.as_mut() else {
            return;
        };
        match msg {
            Message::Quit => {
                self.should_quit = true;
            }
            Message::DialogInput { ch } => dialog.input_char(ch),
            Message::DialogBackspace => dialog.backspace(),
            Message::DialogConfirm => self.close_dialog(true),
            Message::DialogCancel => self.close_dialog(false),
            _ => {}
        }
    }

    /// Closes the open dialog and replays its answer to the controller that
    /// asked.
    fn close_dialog(&mut self, accepted: bool) {
        let Some(dialog) = self.state.dialog.take() else {
            return;
        };
        let (action, mut answer) = dialog.answer(accepted);
        if matches!(answer, PreparedAnswer::Cancelled | PreparedAnswer::Declined) {
            return;
        }

        let state = &mut self.state;
        match action {
            PendingAction::AddChild(path) => {
                if let Some(child) = state.tree_view.add_child(&mut state.forest, &path, &mut answer) {
                    state.tree_view.select_path(&state.forest, &child);
                }
            }
            PendingAction::EditNode(path) => {
                state.tree_view.edit_node(&mut state.forest, &path, &mut answer);
            }
            PendingAction::DeleteNode(path) => {
                state.tree_view.delete_node(&mut state.forest, &path, &mut answer);
            }
            PendingAction::AddCard(column_id) => {
                state.kanban_view.add_card(&mut state.kanban, &column_id, &mut answer);
            }
            PendingAction::RenameCard(card_id) => {
                if state.kanban_view.select_card(&state.kanban, &card_id) {
                    state.kanban_view.rename_card(&mut state.kanban, &mut answer);
                }
            }
        }
    }

    fn navigate_vertical(&mut self, delta: isize) {
        match self.state.tab {
            Tab::Tree => self.state.tree_view.move_cursor(&self.state.forest, delta),
            Tab::Kanban if delta < 0 => self.state.kanban_view.navigate_up(&self.state.kanban),
            Tab::Kanban => self.state.kanban_view.navigate_down(&self.state.kanban),
        }
    }

    fn toggle_selected(&mut self) {
        if self.state.tab != Tab::Tree {
            return;
        }
        let Some(path) = self.state.tree_view.selected_path(&self.state.forest) else {
            return;
        };
        let request = self.state.tree_view.toggle_expand(&mut self.state.forest, &path);
        self.queue_load(request);
    }

    fn queue_load(&mut self, request: Option<LoadRequest>) {
        if let Some(request) = request {
            self.pending_loads.push(request);
        }
    }

    /// Drops the grabbed item onto the selection. With nothing grabbed,
    /// Enter toggles the selected tree row instead.
    fn drop_grabbed(&mut self, cross_level: bool) {
        if self.state.grabbed.is_none() {
            self.toggle_selected();
            return;
        }
        let label = self.state.grabbed_label();
        let Some(active) = self.state.grabbed_drag_id() else {
            // The grabbed item was deleted in the meantime.
            let _ = self.state.cancel_grab();
            return;
        };
        let event = match self.state.drop_target() {
            Some(over) => DragEnd::new(active, over),
            None => DragEnd::cancelled(active),
        }
        .with_cross_level(cross_level);

        let grabbed = self.state.grabbed.take();
        let state = &mut self.state;
        match grabbed {
            Some(Grab::Node { .. }) => {
                match state.tree_view.on_drag_end(&mut state.forest, &event) {
                    TreeDrop::Move(_) => state.status = label.map(|name| format!("Moved {name}")),
                    TreeDrop::Rejected(reason) => state.set_status(capitalize(&reason.to_string())),
                    TreeDrop::Ignored => state.status = None,
                }
            }
            Some(Grab::Card { .. }) => {
                state.status = state
                    .kanban_view
                    .on_drag_end(&mut state.kanban, &event)
                    .and(label)
                    .map(|title| format!("Moved {title}"));
            }
            None => {}
        }
    }

    fn open_add_dialog(&mut self) {
        let state = &mut self.state;
        state.dialog = match state.tab {
            Tab::Tree => {
                // With nothing selected the new node becomes a root.
                let parent = state.tree_view.selected_path(&state.forest).unwrap_or_default();
                Some(Dialog::prompt(NEW_NODE_PROMPT, None, PendingAction::AddChild(parent)))
            }
            Tab::Kanban => state
                .kanban_view
                .selected_column(&state.kanban)
                .map(|column| Dialog::prompt(NEW_CARD_PROMPT, None, PendingAction::AddCard(column.id.clone()))),
        };
    }

    fn open_edit_dialog(&mut self) {
        let state = &mut self.state;
        state.dialog = match state.tab {
            Tab::Tree => state.tree_view.selected_row(&state.forest).map(|row| {
                Dialog::prompt(EDIT_NODE_PROMPT, Some(&row.name), PendingAction::EditNode(row.path))
            }),
            Tab::Kanban => state
                .kanban_view
                .selected_card_id(&state.kanban)
                .and_then(|card_id| {
                    let title = state.kanban.card(&card_id)?.title.clone();
                    Some(Dialog::prompt(
                        RENAME_CARD_PROMPT,
                        Some(&title),
                        PendingAction::RenameCard(card_id),
                    ))
                }),
        };
    }

    /// Tree nodes are deleted after a confirmation; cards go at once.
    fn delete_selected(&mut self) {
        let state = &mut self.state;
        match state.tab {
            Tab::Tree => {
                state.dialog = state.tree_view.selected_row(&state.forest).map(|row| {
                    Dialog::confirm(delete_confirmation(&row.name), PendingAction::DeleteNode(row.path))
                });
            }
            Tab::Kanban => {
                state.kanban_view.delete_card(&mut state.kanban);
            }
        }
    }

    /// Hands every queued fetch to the tokio runtime.
    ///
    /// Each task reports back through the app's channel; see
    /// [`apply_load`](Self::apply_load).
    pub fn spawn_pending_loads(&mut self) {
        for request in std::mem::take(&mut self.pending_loads) {
            let provider = Arc::clone(&self.provider);
            let tx = self.loads_tx.clone();
            debug!(node_id = %request.node_id, "spawning child fetch");
            tokio::spawn(async move {
                let result = provider.fetch(&request.node_id).await;
                // The receiver only goes away with the app.
                let _ = tx.send(LoadCompletion { request, result });
            });
        }
    }

    /// Waits for the next fetch spawned by
    /// [`spawn_pending_loads`](Self::spawn_pending_loads) to finish.
    pub async fn next_completion(&mut self) -> Option<LoadCompletion> {
        self.loads_rx.recv().await
    }

    /// Applies a finished fetch to the tree.
    pub fn apply_load(&mut self, completion: LoadCompletion) -> LoadOutcome {
        let outcome = TreeView::complete_load(
            &mut self.state.forest,
            &completion.request,
            completion.result,
        );
        if let LoadOutcome::Failed(err) = &outcome {
            self.state.set_status(format!("Could not load children: {err}"));
        }
        self.state.tree_view.clamp_cursor(&self.state.forest);
        outcome
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.loads_rx.try_recv() {
            self.apply_load(completion);
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            self.render_terminal_too_small(frame, area);
            return;
        }

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;

        let header_height = if show_header { HEADER_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);

        if show_header {
            self.render_header(frame, chunks[0]);
        }
        self.render_content(frame, chunks[1]);

        let grabbed_label = self.state.grabbed_label();
        render_status_bar(
            self.state.tab,
            self.state.status.as_deref(),
            grabbed_label.as_deref(),
            chunks[2],
            frame.buffer_mut(),
        );

        if let Some(dialog) = &self.state.dialog {
            render_dialog(dialog, area, frame.buffer_mut());
        }

        if self.state.help_visible {
            render_help_overlay(area, frame.buffer_mut());
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(&self, frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: false });

        // Center the message vertically
        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Runs the main application loop.
    ///
    /// This function returns when the user quits. Each turn renders, hands
    /// new fetches to the runtime, applies finished ones, and handles at
    /// most one terminal event.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use trellis_config::Config;
    /// use trellis_tui::provider::MockChildProvider;
    /// use trellis_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let config = Config::default();
    ///     let provider = Arc::new(MockChildProvider::new(&config.tree));
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(config, provider);
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        info!("event loop started");
        loop {
            terminal.draw(|frame| self.view(frame))?;

            self.spawn_pending_loads();
            self.drain_completions();

            if let Some(event) = poll_event()? {
                let dialog = self.state.dialog.as_ref().map(Dialog::is_prompt);
                if let Some(msg) = event_to_message(&event, dialog) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }
        }
        info!("event loop stopped");

        Ok(())
    }

    /// Renders the header bar with the tab title, tab strip, and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, tabs_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(18),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "trellis",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(self.state.tab.title(), Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let selected = Tab::all()
            .iter()
            .position(|tab| *tab == self.state.tab)
            .unwrap_or_default();
        let tabs = Tabs::new(Tab::all().iter().map(|tab| tab.label()))
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let state = &self.state;
        let buf = frame.buffer_mut();
        match state.tab {
            Tab::Tree => {
                let rows = state.tree_view.rows(&state.forest);
                let grabbed = match state.grabbed {
                    Some(Grab::Node { .. }) => state.grabbed_drag_id(),
                    _ => None,
                };
                render_tree(&rows, state.tree_view.cursor(), grabbed.as_deref(), area, buf);
            }
            Tab::Kanban => {
                let grabbed = match &state.grabbed {
                    Some(Grab::Card { card_id }) => Some(card_id.as_str()),
                    _ => None,
                };
                render_board(&state.kanban, &state.kanban_view, grabbed, area, buf);
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
