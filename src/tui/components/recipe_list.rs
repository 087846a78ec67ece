//! # RecipeList Component
//!
//! Scrollable view of the current search results.
//!
//! ## Responsibilities
//!
//! - Display one `RecipeRow` per recipe, in result order
//! - Materialize only the rows near the viewport
//! - Keyboard selection, scrolling, and mouse hit testing
//! - Show the fetch outcome when there is nothing to list (idle, searching,
//!   no results) and an error banner when the last search failed
//!
//! ## Architecture
//!
//! `RecipeList` is a transient component (created each frame) that wraps
//! `&'a mut RecipeListState` (persistent state) and the recipe slice (props).
//! Row heights are cached per row key (`"{index}-{title}"`), so a new result
//! set invalidates exactly the rows whose identity changed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::state::FetchStatus;
use crate::recipes::Recipe;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::recipe_row::{RecipeRow, VIEW_RECIPE_LABEL};
use crate::tui::event::TuiEvent;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
/// Columns between a row's left edge and its text (border + padding).
const ROW_TEXT_INSET: u16 = 2;

/// High-level events emitted by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// Open the link of the row at this index.
    Open(usize),
}

/// What a mouse position points at inside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub index: usize,
    /// True when the position is on the "View Recipe" control.
    pub on_control: bool,
}

/// Layout and scroll state for the recipe list.
/// Must be persisted in the parent TuiState.
pub struct RecipeListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// Currently selected row (keyboard navigation or click)
    pub selected_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Screen area the rows were last drawn into
    pub rows_area: Rect,
}

impl Default for RecipeListState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            selected_index: None,
            viewport_height: 0,
            rows_area: Rect::default(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.layout.heights.len()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected row is fully visible.
    /// If the row is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.layout.prefix_heights.len() {
            return;
        }

        let item_top = self.layout.row_top(idx);
        let item_bottom = self.layout.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => (i + 1).min(count - 1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    pub fn select_prev(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => i.saturating_sub(1),
            None => count - 1,
        });
        self.scroll_to_selected();
    }

    /// Map a screen position onto a row, using the layout from the last render.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<RowHit> {
        if !self.rows_area.contains(Position::new(col, row)) {
            return None;
        }
        let content_y = (row - self.rows_area.y) + self.scroll_state.offset().y;
        let index = self
            .layout
            .prefix_heights
            .partition_point(|&end| end <= content_y);
        if index >= self.layout.prefix_heights.len() {
            return None; // Below all rows
        }

        let offset_in_row = content_y - self.layout.row_top(index);
        let label_start = self.rows_area.x + ROW_TEXT_INSET;
        let label_end = label_start + VIEW_RECIPE_LABEL.width() as u16;
        let on_control = offset_in_row == self.layout.control_offsets[index]
            && (label_start..label_end).contains(&col);

        Some(RowHit { index, on_control })
    }
}

/// Scrollable result list.
/// Created fresh each frame with references to state and data.
pub struct RecipeList<'a> {
    pub state: &'a mut RecipeListState,
    pub recipes: &'a [Recipe],
    pub fetch: &'a FetchStatus,
    pub spinner_frame: usize,
}

impl<'a> RecipeList<'a> {
    pub fn new(
        state: &'a mut RecipeListState,
        recipes: &'a [Recipe],
        fetch: &'a FetchStatus,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            recipes,
            fetch,
            spinner_frame,
        }
    }

    fn placeholder(&self) -> Option<String> {
        if !self.recipes.is_empty() {
            return None;
        }
        match self.fetch {
            FetchStatus::Idle => Some("Type a dish or ingredient above and press Enter.".into()),
            FetchStatus::Pending { .. } => Some(format!(
                "{} Searching...",
                SPINNER[self.spinner_frame % SPINNER.len()]
            )),
            FetchStatus::Loaded { .. } => Some("No recipes found.".into()),
            // The error banner says it all
            FetchStatus::Failed { .. } => None,
        }
    }
}

impl<'a> Component for RecipeList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows_area = if let FetchStatus::Failed { reason } = self.fetch {
            let [banner_area, rest] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
            let banner = Paragraph::new(format!("Search failed: {reason}")).style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_widget(banner, banner_area);
            rest
        } else {
            area
        };

        let content_width = rows_area.width.saturating_sub(1); // -1 for scrollbar safe area
        self.state.rows_area = rows_area;
        self.state.viewport_height = rows_area.height;

        // 1. Update layout cache, re-measuring only rows whose identity changed
        let keys: Vec<String> = self
            .recipes
            .iter()
            .enumerate()
            .map(|(i, r)| r.row_key(i))
            .collect();
        let list_replaced = keys != self.state.layout.row_keys;
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(&keys, content_width);
        layout.truncate(reusable);
        for recipe in self.recipes.iter().skip(reusable) {
            layout.push(
                RecipeRow::calculate_height(recipe, content_width),
                RecipeRow::control_offset(recipe, content_width),
            );
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(keys, content_width);

        // A new result set starts at the top with the first row selected
        if list_replaced {
            self.state.scroll_state.set_offset(Position { x: 0, y: 0 });
            self.state.selected_index = (!self.recipes.is_empty()).then_some(0);
        }

        if let Some(text) = self.placeholder() {
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(placeholder, rows_area);
            return;
        }

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.clamp_scroll();

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self
            .state
            .layout
            .visible_range(scroll_offset, rows_area.height);
        let total_height = self.state.layout.total_height();

        // 3. Render visible rows into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let top = self.state.layout.row_top(i);
            let height = self.state.layout.heights[i];
            let is_selected = self.state.selected_index == Some(i);
            scroll_view.render_widget(
                RecipeRow::new(&self.recipes[i], is_selected),
                Rect::new(0, top, content_width, height),
            );
        }

        frame.render_stateful_widget(scroll_view, rows_area, &mut self.state.scroll_state);
    }
}

/// Event handling lives on `RecipeListState` because `RecipeList` is rebuilt
/// every frame and can't hold selection or scroll position.
impl EventHandler for RecipeListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.select_prev();
                None
            }
            TuiEvent::CursorDown => {
                self.select_next();
                None
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('o') => {
                self.selected_index.map(ListEvent::Open)
            }
            _ => None,
        }
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    /// Row offset of each row's "View Recipe" line
    pub control_offsets: Vec<u16>,
    row_keys: Vec<String>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            control_offsets: Vec::new(),
            row_keys: Vec::new(),
            content_width: 0,
        }
    }

    /// Number of leading rows whose cached measurements are still valid.
    pub fn reusable_count(&self, keys: &[String], content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.row_keys
            .iter()
            .zip(keys)
            .take_while(|(cached, new)| cached == new)
            .count()
            .min(self.heights.len())
    }

    pub fn truncate(&mut self, len: usize) {
        self.heights.truncate(len);
        self.control_offsets.truncate(len);
    }

    pub fn push(&mut self, height: u16, control_offset: u16) {
        self.heights.push(height);
        self.control_offsets.push(control_offset);
    }

    pub fn update_metadata(&mut self, row_keys: Vec<String>, content_width: u16) {
        self.row_keys = row_keys;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn row_top(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    /// Rows intersecting the viewport, padded by half a viewport on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::recipe;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn keys(titles: &[&str]) -> Vec<String> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{i}-{t}"))
            .collect()
    }

    fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        state: &mut RecipeListState,
        recipes: &[Recipe],
        fetch: &FetchStatus,
    ) {
        terminal
            .draw(|f| RecipeList::new(state, recipes, fetch, 0).render(f, f.area()))
            .unwrap();
    }

    fn loaded(count: usize) -> FetchStatus {
        FetchStatus::Loaded {
            count,
            at: chrono::Local::now(),
        }
    }

    #[test]
    fn test_layout_cache_reuses_matching_prefix() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![5, 5, 5];
        cache.update_metadata(keys(&["A", "B", "C"]), 80);

        assert_eq!(cache.reusable_count(&keys(&["A", "B", "C"]), 80), 3);
        assert_eq!(cache.reusable_count(&keys(&["A", "X", "C"]), 80), 1);
        assert_eq!(cache.reusable_count(&keys(&["Z"]), 80), 0);
        // Width change invalidates everything
        assert_eq!(cache.reusable_count(&keys(&["A", "B", "C"]), 40), 0);
    }

    #[test]
    fn test_visible_range_skips_far_rows() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![5; 100];
        cache.rebuild_prefix_heights();

        let range = cache.visible_range(250, 10);
        assert!(range.start > 0);
        assert!(range.end < 100);
        assert!(range.contains(&50));
    }

    #[test]
    fn test_renders_rows_in_order() {
        let recipes = vec![
            recipe("Alpha Soup", "water, salt", "http://example/a"),
            recipe("Beta Bread", "flour, yeast", "http://example/b"),
            recipe("Gamma Salad", "lettuce", "http://example/c"),
        ];
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = RecipeListState::new();

        draw(&mut terminal, &mut state, &recipes, &loaded(3));

        let lines = screen_lines(&terminal);
        let find = |needle: &str| lines.iter().position(|l| l.contains(needle));
        let a = find("Alpha Soup").unwrap();
        let b = find("Beta Bread").unwrap();
        let c = find("Gamma Salad").unwrap();
        assert!(a < b && b < c);
        assert!(find("water, salt").unwrap() > a);
        assert_eq!(
            lines.iter().filter(|l| l.contains("View Recipe")).count(),
            3
        );
        assert_eq!(state.row_count(), 3);
    }

    #[test]
    fn test_new_result_set_selects_first_row() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = RecipeListState::new();
        let recipes = vec![recipe("A", "", ""), recipe("B", "", "")];

        draw(&mut terminal, &mut state, &recipes, &loaded(2));
        assert_eq!(state.selected_index, Some(0));

        state.select_next();
        draw(&mut terminal, &mut state, &recipes, &loaded(2));
        assert_eq!(state.selected_index, Some(1), "same list keeps selection");

        draw(&mut terminal, &mut state, &[], &loaded(0));
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_placeholders() {
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        let mut state = RecipeListState::new();

        draw(&mut terminal, &mut state, &[], &FetchStatus::Idle);
        assert!(screen_lines(&terminal).concat().contains("press Enter"));

        draw(&mut terminal, &mut state, &[], &FetchStatus::Pending { seq: 1 });
        assert!(screen_lines(&terminal).concat().contains("Searching"));

        draw(&mut terminal, &mut state, &[], &loaded(0));
        assert!(screen_lines(&terminal).concat().contains("No recipes found"));
    }

    #[test]
    fn test_failure_banner_above_previous_rows() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut state = RecipeListState::new();
        let recipes = vec![recipe("Kept", "", "")];
        let failed = FetchStatus::Failed {
            reason: "network error: refused".into(),
        };

        draw(&mut terminal, &mut state, &recipes, &failed);

        let lines = screen_lines(&terminal);
        assert!(lines[0].contains("Search failed: network error: refused"));
        assert!(lines.iter().skip(1).any(|l| l.contains("Kept")));
        assert_eq!(state.rows_area.y, 1);
    }

    #[test]
    fn test_hit_test_finds_control() {
        let recipes = vec![
            recipe("R0", "a", "http://example/r0"),
            recipe("R1", "b", "http://example/r1"),
        ];
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = RecipeListState::new();
        draw(&mut terminal, &mut state, &recipes, &loaded(2));

        let lines = screen_lines(&terminal);
        let control_rows: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.contains("View Recipe"))
            .map(|(y, _)| y)
            .collect();
        // Border glyphs are multi-byte; count chars to get the column
        let line = &lines[control_rows[1]];
        let col = line[..line.find("View Recipe").unwrap()].chars().count() as u16;

        assert_eq!(
            state.hit_test(col, control_rows[1] as u16),
            Some(RowHit {
                index: 1,
                on_control: true
            })
        );
        // Title line of row 0 is a plain row hit
        assert_eq!(
            state.hit_test(col, 1),
            Some(RowHit {
                index: 0,
                on_control: false
            })
        );
        // Below the last row
        assert_eq!(state.hit_test(col, 19), None);
    }

    #[test]
    fn test_keyboard_selection_and_open() {
        let recipes = vec![recipe("A", "", ""), recipe("B", "", ""), recipe("C", "", "")];
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = RecipeListState::new();
        draw(&mut terminal, &mut state, &recipes, &loaded(3));

        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown); // clamps at last row
        assert_eq!(state.selected_index, Some(2));
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(ListEvent::Open(2)));

        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('o')),
            Some(ListEvent::Open(1))
        );
    }

    #[test]
    fn test_selecting_offscreen_row_scrolls() {
        let recipes: Vec<Recipe> = (0..20)
            .map(|i| recipe(&format!("Recipe {i}"), "x", ""))
            .collect();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut state = RecipeListState::new();
        draw(&mut terminal, &mut state, &recipes, &loaded(20));

        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        draw(&mut terminal, &mut state, &recipes, &loaded(20));

        assert!(state.scroll_state.offset().y > 0);
        assert!(screen_lines(&terminal).concat().contains("Recipe 10"));
    }
}
