use khub_core::session::hubs::EMPTY_HUBS_MESSAGE;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::components::truncate_with_ellipsis;
use crate::ui::layout;
use crate::ui::state::HubsFocus;
use crate::ui::{theme, App};

pub fn render_hubs(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Length(layout::CREATE_FORM_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    render_create_form(f, app, layout::with_content_padding(chunks[1]));
    render_grid(f, app, layout::with_content_padding(chunks[2]));
    render_footer(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title_color = if app.pending_quit {
        theme::ACCENT_ERROR
    } else {
        theme::ACCENT_PRIMARY
    };
    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(padding.clone()),
            Span::styled(
                "Local Knowledge Hub",
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(padding),
            Span::styled("Your hubs", theme::hint()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_create_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.home.focus == HubsFocus::CreateForm;
    let hubs = &app.home.hubs;

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(area);

    let name = hubs.new_hub_name();
    let input = if name.is_empty() && !focused {
        Paragraph::new("New hub name").style(Style::default().fg(theme::TEXT_DIM))
    } else {
        let cursor = if focused { "▏" } else { "" };
        Paragraph::new(format!("{}{}", name, cursor)).style(Style::default().fg(theme::TEXT_PRIMARY))
    };
    f.render_widget(
        input.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(focused))
                .style(Style::default().bg(theme::BG_INPUT)),
        ),
        chunks[0],
    );

    let button = if hubs.is_creating() {
        Span::styled(format!("Creating{}", app.ellipsis()), theme::button(false))
    } else {
        let enabled = focused && !name.trim().is_empty();
        Span::styled("[ Create Hub ]", theme::button(enabled))
    };
    f.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), button])), chunks[1]);
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    if area.is_empty() {
        return;
    }
    let hubs = &app.home.hubs;

    if !hubs.is_loaded() {
        let text = if hubs.is_loading() {
            format!("{} Loading hubs{}", app.spinner_char(), app.ellipsis())
        } else {
            "Hubs unavailable. Press r to retry.".to_string()
        };
        render_centered_message(f, area, &text);
        return;
    }
    if hubs.shows_empty_state() {
        render_centered_message(f, area, EMPTY_HUBS_MESSAGE);
        return;
    }

    let columns = layout::hub_grid_columns(area.width);
    let card_width = area.width / columns as u16;
    let visible_rows = (area.height / layout::HUB_CARD_HEIGHT).max(1) as usize;

    // Keep the selected row on screen
    let selected_row = app.home.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (index, hub) in hubs.hubs().iter().enumerate() {
        let row = index / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = index % columns;
        // A short grid still shows the top of the selected row, clipped to the area
        let card = Rect::new(
            area.x + col as u16 * card_width,
            area.y + (row - first_row) as u16 * layout::HUB_CARD_HEIGHT,
            card_width.saturating_sub(1),
            layout::HUB_CARD_HEIGHT,
        )
        .intersection(area);
        if card.is_empty() {
            continue;
        }

        let is_selected = app.home.focus == HubsFocus::Grid && index == app.home.selected;
        let bg = if is_selected {
            theme::BG_SELECTED
        } else {
            theme::BG_CARD
        };
        let inner_width = card.width.saturating_sub(6) as usize;
        let lines = vec![
            Line::from(vec![
                Span::styled("▣ ", Style::default().fg(theme::ACCENT_SPECIAL)),
                Span::styled(
                    truncate_with_ellipsis(&hub.name, inner_width),
                    Style::default()
                        .fg(theme::TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "Chat now →",
                Style::default().fg(if is_selected {
                    theme::ACCENT_PRIMARY
                } else {
                    theme::TEXT_MUTED
                }),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border(is_selected))
                    .style(Style::default().bg(bg)),
            ),
            card,
        );
    }
}

fn render_centered_message(f: &mut Frame, area: Rect, text: &str) {
    let line_area = Rect::new(area.x, area.y + area.height / 3, area.width, 1).intersection(area);
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().fg(theme::TEXT_MUTED))
            .alignment(Alignment::Center),
        line_area,
    );
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.pending_quit {
        "Press Ctrl+C again to quit"
    } else {
        match app.home.focus {
            HubsFocus::Grid => "←↓↑→ select · Enter open · n new hub · r refresh · q quit",
            HubsFocus::CreateForm => "Enter create · Esc/Tab back to hubs",
        }
    };
    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    f.render_widget(
        Paragraph::new(format!("{}{}", padding, hints)).style(theme::hint()),
        area,
    );
}
