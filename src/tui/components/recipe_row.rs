use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::recipes::Recipe;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

pub const VIEW_RECIPE_LABEL: &str = "[ View Recipe ]";

/// One search result: title, ingredients, and the "View Recipe" control.
///
/// Transient: built each frame for visible rows only. Text is wrapped here
/// with `textwrap` so [`calculate_height`](Self::calculate_height) and
/// `render` always agree on the number of lines.
#[derive(Clone, Copy)]
pub struct RecipeRow<'a> {
    pub recipe: &'a Recipe,
    pub is_selected: bool,
}

fn wrap(text: &str, width: u16) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

impl<'a> RecipeRow<'a> {
    pub fn new(recipe: &'a Recipe, is_selected: bool) -> Self {
        Self {
            recipe,
            is_selected,
        }
    }

    fn title_lines(recipe: &Recipe, width: u16) -> Vec<String> {
        let lines = wrap(&recipe.title, width.saturating_sub(HORIZONTAL_OVERHEAD));
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }

    fn ingredient_lines(recipe: &Recipe, width: u16) -> Vec<String> {
        wrap(&recipe.ingredients, width.saturating_sub(HORIZONTAL_OVERHEAD))
    }

    /// Height of the row at the given width, borders included.
    pub fn calculate_height(recipe: &Recipe, width: u16) -> u16 {
        if width <= HORIZONTAL_OVERHEAD {
            // Too narrow for borders + padding; still occupy a line
            return 1;
        }
        let title = Self::title_lines(recipe, width).len() as u16;
        let ingredients = Self::ingredient_lines(recipe, width).len() as u16;
        title + ingredients + 1 + VERTICAL_OVERHEAD
    }

    /// Offset of the "View Recipe" line from the top of the row.
    pub fn control_offset(recipe: &Recipe, width: u16) -> u16 {
        Self::calculate_height(recipe, width).saturating_sub(VERTICAL_OVERHEAD / 2 + 1)
    }
}

impl<'a> Widget for RecipeRow<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        };

        let mut lines: Vec<Line> = Self::title_lines(self.recipe, area.width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().add_modifier(Modifier::BOLD))))
            .collect();
        lines.extend(
            Self::ingredient_lines(self.recipe, area.width)
                .into_iter()
                .map(Line::from),
        );

        let control_style = if self.is_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines.push(Line::from(Span::styled(VIEW_RECIPE_LABEL, control_style)));

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .padding(Padding::horizontal(CONTENT_PAD_H)),
            )
            .render(area, buf);
    }
}
