//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screen,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keystrokes go either to the search bar or to the result list. Submitting
//! a search moves focus to the list, which stands in for dismissing the
//! on-screen keyboard on a phone.
//!
//! ## Redraw Strategy
//!
//! - **Searching**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or when a
//!   background search reports back.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use chrono::Local;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::links::{LinkOpener, SystemLinkOpener};
use crate::recipes::{RecipePuppySource, RecipeSource, SearchRequest};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ListEvent, RecipeListState, SearchBar, SearchBarEvent, SearchBarHit,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    /// Editing the query. Enter submits.
    Search,
    /// Browsing results. Enter opens the selected recipe.
    Results,
}

/// TUI-specific presentation state (not part of core business logic)
pub(crate) struct TuiState {
    pub search_bar: SearchBar,
    pub recipe_list: RecipeListState,
    pub focus: Focus,
    /// Shown in the title bar
    pub api_base_url: String,
}

impl TuiState {
    pub fn new(api_base_url: String) -> Self {
        Self {
            search_bar: SearchBar::new(),
            recipe_list: RecipeListState::new(),
            focus: Focus::Search, // User expects to type immediately
            api_base_url,
        }
    }

    /// Take focus away from the text field once a search is triggered.
    fn dismiss_input(&mut self) {
        self.focus = Focus::Results;
    }
}

/// Translate one terminal event into at most one core action, updating
/// focus and component state along the way.
pub(crate) fn route_event(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize | TuiEvent::MouseMove(..) => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        // Scrolling always goes to the list regardless of focus
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.recipe_list.handle_event(event);
            None
        }
        TuiEvent::MouseClick(col, row) => route_click(tui, *col, *row),
        _ => match tui.focus {
            Focus::Search => match event {
                TuiEvent::Escape | TuiEvent::FocusNext => {
                    tui.focus = Focus::Results;
                    None
                }
                _ => route_to_search_bar(tui, event),
            },
            Focus::Results => match event {
                TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Quit),
                TuiEvent::FocusNext | TuiEvent::InputChar('/') => {
                    tui.focus = Focus::Search;
                    None
                }
                TuiEvent::CursorUp
                | TuiEvent::CursorDown
                | TuiEvent::Submit
                | TuiEvent::InputChar('o') => match tui.recipe_list.handle_event(event) {
                    Some(ListEvent::Open(index)) => Some(Action::OpenRecipe(index)),
                    None => None,
                },
                // Typing auto-switches to the search bar and forwards the event
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                    tui.focus = Focus::Search;
                    route_to_search_bar(tui, event)
                }
                _ => None,
            },
        },
    }
}

fn route_to_search_bar(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.search_bar.handle_event(event)? {
        SearchBarEvent::Changed(text) => Some(Action::QueryChanged(text)),
        SearchBarEvent::Submit => {
            tui.dismiss_input();
            Some(Action::Submit)
        }
    }
}

fn route_click(tui: &mut TuiState, col: u16, row: u16) -> Option<Action> {
    match tui.search_bar.hit_test(col, row) {
        Some(SearchBarHit::Button) => {
            tui.dismiss_input();
            return Some(Action::Submit);
        }
        Some(SearchBarHit::Input) => {
            tui.focus = Focus::Search;
            return None;
        }
        None => {}
    }

    let hit = tui.recipe_list.hit_test(col, row)?;
    tui.focus = Focus::Results;
    tui.recipe_list.selected_index = Some(hit.index);
    hit.on_control.then_some(Action::OpenRecipe(hit.index))
}

/// Carries out the effects returned by `update()`.
pub(crate) struct EffectRunner {
    tx: mpsc::Sender<Action>,
    opener: Arc<dyn LinkOpener>,
    /// The search task currently running, if any
    in_flight: Option<AbortHandle>,
}

impl EffectRunner {
    pub fn new(tx: mpsc::Sender<Action>, opener: Arc<dyn LinkOpener>) -> Self {
        Self {
            tx,
            opener,
            in_flight: None,
        }
    }

    /// Apply `action` and run whatever it asks for. Returns true on quit.
    pub fn dispatch(&mut self, app: &mut App, action: Action) -> bool {
        let effect = update(app, action);
        self.run(app, effect)
    }

    fn run(&mut self, app: &mut App, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::SpawnSearch(request) => {
                // Superseded: its answer would be dropped anyway
                if let Some(handle) = self.in_flight.take() {
                    debug!("Aborting superseded search task");
                    handle.abort();
                }
                self.in_flight = Some(spawn_search(app.source.clone(), request, self.tx.clone()));
                false
            }
            Effect::OpenLink(url) => match self.opener.open(&url) {
                Ok(()) => false,
                Err(e) => self.dispatch(app, Action::LinkFailed(e.to_string())),
            },
        }
    }
}

fn spawn_search(
    source: Arc<dyn RecipeSource>,
    request: SearchRequest,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning search #{} on {} for {:?}",
        request.seq,
        source.name(),
        request.query
    );
    let handle = tokio::spawn(async move {
        let seq = request.seq;
        let action = match source.search(&request).await {
            Ok(response) => Action::ResultsReceived {
                seq,
                results: response.results,
                received_at: Local::now(),
            },
            Err(error) => Action::SearchFailed { seq, error },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send result of search #{}: receiver dropped", seq);
        }
    });
    handle.abort_handle()
}

/// Pre-fill the search bar with `query` and submit it, as if typed.
fn start_initial_search(app: &mut App, tui: &mut TuiState, query: String) -> Effect {
    info!("Starting with query {:?}", query);
    tui.search_bar.set_text(&query);
    update(app, Action::QueryChanged(query));
    tui.dismiss_input();
    update(app, Action::Submit)
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Allows telling Esc apart from Alt-sequences; ignored by terminals without support
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn RecipeSource> = Arc::new(RecipePuppySource::new(
        config.base_url.clone(),
        config.timeout,
        &config.user_agent,
    ));
    let mut app = App::new(source);
    let mut tui = TuiState::new(config.base_url.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut effects = EffectRunner::new(tx, Arc::new(SystemLinkOpener));

    if let Some(query) = config.initial_query {
        let effect = start_initial_search(&mut app, &mut tui, query);
        effects.run(&mut app, effect);
    }

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 8.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Short timeout while the spinner runs, long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&mut tui, &event) {
                debug!("Event {:?} -> {:?}", event, action);
                should_quit |= effects.dispatch(&mut app, action);
            }
        }

        // Handle results from background searches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= effects.dispatch(&mut app, action);
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
