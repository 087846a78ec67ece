use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::search_bar::SEARCH_BAR_HEIGHT;
use crate::tui::components::title_bar::display_host;
use crate::tui::components::{RecipeList, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

/// Screen regions, top to bottom.
pub struct ScreenLayout {
    pub title: Rect,
    pub search: Rect,
    pub list: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [title, search, list, help] =
        Layout::vertical([Length(1), Length(SEARCH_BAR_HEIGHT), Min(0), Length(1)]).areas(area);
    ScreenLayout {
        title,
        search,
        list,
        help,
    }
}

fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Search => "Enter search  Tab results  Esc results  Ctrl+C quit",
        Focus::Results => "↑/↓ select  Enter/o view recipe  / or Tab search  q/Esc quit",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let layout = screen_layout(frame.area());

    let mut title_bar = TitleBar::new(
        display_host(&tui.api_base_url).to_string(),
        app.status_message.clone(),
        app.is_loading().then_some(spinner_frame),
    );
    title_bar.render(frame, layout.title);

    tui.search_bar.focused = tui.focus == Focus::Search;
    tui.search_bar.render(frame, layout.search);

    RecipeList::new(&mut tui.recipe_list, &app.recipes, &app.fetch, spinner_frame)
        .render(frame, layout.list);

    frame.render_widget(
        Span::styled(help_text(tui.focus), Style::default().fg(Color::DarkGray)),
        layout.help,
    );
}
