use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C, quits from anywhere
    Escape,
    Submit,
    FocusNext, // Tab

    // Text editing
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Navigation
    CursorUp,
    CursorDown,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    MouseMove(u16, u16),
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(raw) => translate(raw),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Map a raw crossterm event onto a `TuiEvent`.
pub fn translate(raw: Event) -> Option<TuiEvent> {
    match raw {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved => Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row)),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; only presses and repeats count
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::CursorHome),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => Some(TuiEvent::FocusNext),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}
