use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::layout;
use crate::ui::{App, View};

pub(crate) fn render(f: &mut Frame, app: &mut App) {
    // Fill entire frame with app background (pure black)
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    match app.view {
        View::Hubs => {
            let content = layout::with_content_padding(chunks[0]);
            app.home.grid_columns = layout::hub_grid_columns(content.width);
            ui::views::render_hubs(f, app, chunks[0]);
        }
        View::Chat => ui::views::render_chat(f, app, chunks[0]),
    }

    render_statusbar(
        f,
        chunks[1],
        app.current_notification(),
        app.backend_url(),
    );
}
