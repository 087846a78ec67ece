//! # SearchBar Component
//!
//! The top bar: a single-line query field and a "Search" button.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete, cursor movement)
//! - Report the full query text after every edit
//! - Report a submit on Enter, or when the button is clicked
//!
//! The buffer is kept verbatim. Nothing is trimmed, and an empty query
//! submits like any other.

mod cursor;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary, visible_text};

/// Width of the "Search" button, borders included.
const BUTTON_WIDTH: u16 = 12;
/// Borders plus one column of padding on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Search bar height: one text row plus borders.
pub const SEARCH_BAR_HEIGHT: u16 = 3;

const BUTTON_COLOR: Color = Color::Rgb(0x17, 0x86, 0x4B);

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchBarEvent {
    /// The query text changed; carries the complete new text.
    Changed(String),
    /// Enter pressed or button clicked.
    Submit,
}

/// Which part of the bar a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBarHit {
    Input,
    Button,
}

/// Query field plus button.
///
/// # Props
///
/// - `focused`: whether keystrokes go here (draws the cursor)
///
/// # State
///
/// - `buffer`: the query text
/// - `cursor`: cursor byte offset and horizontal scroll
/// - last rendered input/button areas, for mouse hit testing
pub struct SearchBar {
    buffer: String,
    pub focused: bool,
    cursor: CursorState,
    input_area: Rect,
    button_area: Rect,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
            cursor: CursorState::new(),
            input_area: Rect::default(),
            button_area: Rect::default(),
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the text and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor.pos = self.buffer.len();
    }

    pub fn hit_test(&self, col: u16, row: u16) -> Option<SearchBarHit> {
        let pos = Position::new(col, row);
        if self.button_area.contains(pos) {
            Some(SearchBarHit::Button)
        } else if self.input_area.contains(pos) {
            Some(SearchBarHit::Input)
        } else {
            None
        }
    }

    fn changed(&self) -> Option<SearchBarEvent> {
        Some(SearchBarEvent::Changed(self.buffer.clone()))
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [input_area, button_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(BUTTON_WIDTH)]).areas(area);
        self.input_area = input_area;
        self.button_area = button_area;

        let text_width = input_area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.cursor.update_scroll(&self.buffer, text_width);

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        };

        let input = Paragraph::new(visible_text(&self.buffer, self.cursor.scroll_cols, text_width))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(" Search recipes ")
                    .padding(ratatui::widgets::Padding::horizontal(1)),
            );
        frame.render_widget(input, input_area);

        let button = Paragraph::new("Search")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(BUTTON_COLOR)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::bordered().border_type(BorderType::Rounded));
        frame.render_widget(button, button_area);

        if self.focused && text_width > 0 {
            let col = self.cursor.screen_column(&self.buffer, text_width);
            frame.set_cursor_position((
                input_area.x + HORIZONTAL_OVERHEAD / 2 + col,
                input_area.y + 1,
            ));
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchBarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                self.changed()
            }
            // Cursor movement is local; the query text is unchanged
            TuiEvent::CursorLeft => {
                self.cursor.move_left(&self.buffer);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor.move_right(&self.buffer);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.move_home();
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.move_end(&self.buffer);
                None
            }
            TuiEvent::Submit => Some(SearchBarEvent::Submit),
            _ => None,
        }
    }
}
