//! # TitleBar Component
//!
//! Top status line: app name, the active API host, and the status message
//! from the core (searching, result count, failure reason).
//!
//! Stateless: all three values are props, rebuilt every frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct TitleBar {
    /// Host part of the API base URL (e.g. "www.recipepuppy.com")
    pub api_host: String,
    pub status_message: String,
    /// Spinner frame while a search is in flight; `None` when idle
    pub spinner_frame: Option<usize>,
}

impl TitleBar {
    pub fn new(api_host: String, status_message: String, spinner_frame: Option<usize>) -> Self {
        Self {
            api_host,
            status_message,
            spinner_frame,
        }
    }
}

/// Host portion of a base URL, for display only.
pub fn display_host(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme
        .split(['/', '?'])
        .next()
        .unwrap_or(without_scheme)
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!("Recipe Search ({})", self.api_host),
            Style::default().fg(Color::Green),
        )];
        if let Some(frame_idx) = self.spinner_frame {
            spans.push(Span::raw(format!(" {}", SPINNER[frame_idx % SPINNER.len()])));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
