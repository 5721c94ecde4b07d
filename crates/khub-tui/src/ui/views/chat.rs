use khub_core::models::{DocumentKind, Message};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::components::truncate_with_ellipsis;
use crate::ui::layout;
use crate::ui::state::ChatScreen;
use crate::ui::{theme, App};

pub fn render_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(screen) = app.chat.as_ref() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::CHAT_INPUT_HEIGHT),
        Constraint::Length(layout::FOOTER_HEIGHT),
    ])
    .split(area);

    render_header(f, app, screen, chunks[0]);
    let max_scroll = render_transcript(f, app, screen, layout::with_content_padding(chunks[1]));
    render_input(f, screen, layout::with_content_padding(chunks[2]));
    render_footer(f, app, screen, chunks[3]);

    if screen.upload_prompt_open {
        render_upload_prompt(f, screen, area);
    }

    if let Some(screen) = app.chat.as_mut() {
        screen.clamp_scroll(max_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, screen: &ChatScreen, area: Rect) {
    let title_color = if app.pending_quit {
        theme::ACCENT_ERROR
    } else {
        theme::ACCENT_PRIMARY
    };

    let upload_label = if screen.upload.is_in_progress() {
        Span::styled(
            format!("{} Processing{}", app.spinner_char(), app.ellipsis()),
            Style::default().fg(theme::ACCENT_WARNING),
        )
    } else {
        Span::styled("[ Upload Document ]", theme::button(true))
    };
    let label_width = upload_label.width() as u16 + layout::CONTENT_PADDING_H;

    // Title sits on the middle header row; a squeezed header keeps whatever row it has
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)]).split(area);
    let row = if rows[1].is_empty() { rows[0] } else { rows[1] };
    if row.is_empty() {
        return;
    }
    let cols = Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width)]).split(row);

    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let name_width = (cols[0].width as usize).saturating_sub(padding.len() + 4);
    let title = Line::from(vec![
        Span::raw(padding),
        Span::styled("← ", theme::hint()),
        Span::styled(
            truncate_with_ellipsis(screen.hub_name(), name_width),
            Style::default().fg(title_color).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(title), cols[0]);
    f.render_widget(Paragraph::new(Line::from(upload_label)), cols[1]);
}

fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let color = theme::role_color(message.role);
    let mut header = vec![Span::styled(
        message.role.label().to_uppercase(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if !message.sources.is_empty() {
        let noun = if message.sources.len() == 1 {
            "source"
        } else {
            "sources"
        };
        header.push(Span::styled(
            format!("  · {} {}", message.sources.len(), noun),
            Style::default().fg(theme::TEXT_DIM),
        ));
    }

    let mut lines = vec![Line::from(header)];
    lines.extend(message.content.lines().map(|text| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme::TEXT_PRIMARY),
        ))
    }));
    lines.push(Line::from(""));
    lines
}

/// Draw the transcript pinned to the newest line. Returns the largest useful
/// `scroll_from_bottom` for this area.
fn render_transcript(f: &mut Frame, app: &App, screen: &ChatScreen, area: Rect) -> u16 {
    let session = &screen.session;

    if session.transcript().is_empty() && !session.is_pending() {
        let empty_area = Rect::new(area.x, area.y + area.height / 3, area.width, 2).intersection(area);
        let lines = vec![
            Line::from(Span::styled(
                format!("Start chatting with your documents in {}", screen.hub_name()),
                Style::default().fg(theme::TEXT_PRIMARY),
            )),
            Line::from(Span::styled(
                "Upload a PDF, Word doc, or Text file to get started.",
                theme::hint(),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            empty_area,
        );
        return 0;
    }

    let mut lines: Vec<Line> = session.transcript().iter().flat_map(message_lines).collect();
    if session.is_pending() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", app.spinner_char()),
                Style::default().fg(theme::ACCENT_SPECIAL),
            ),
            Span::styled(
                format!("Thinking{}", app.ellipsis()),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = u16::try_from(paragraph.line_count(area.width)).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(area.height);
    let offset = max_scroll.saturating_sub(screen.scroll_from_bottom);
    f.render_widget(paragraph.scroll((offset, 0)), area);
    max_scroll
}

fn render_input(f: &mut Frame, screen: &ChatScreen, area: Rect) {
    let session = &screen.session;
    let focused = !screen.upload_prompt_open;

    let (text, style) = if session.input().is_empty() {
        (
            "Ask a question about your documents...".to_string(),
            Style::default().fg(theme::TEXT_DIM),
        )
    } else {
        let visible = (area.width as usize).saturating_sub(4);
        let input = session.input();
        // Show the tail so the cursor end stays visible
        let tail: String = {
            let chars: Vec<char> = input.chars().collect();
            let start = chars.len().saturating_sub(visible);
            chars[start..].iter().collect()
        };
        (tail, Style::default().fg(theme::TEXT_PRIMARY))
    };

    let send_style = theme::button(session.can_submit());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title_bottom(Line::from(Span::styled(" Enter to send ", send_style)).right_aligned())
        .style(Style::default().bg(theme::BG_INPUT));
    f.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn render_footer(f: &mut Frame, app: &App, screen: &ChatScreen, area: Rect) {
    let hints = if app.pending_quit {
        "Press Ctrl+C again to quit"
    } else if screen.upload_prompt_open {
        "Enter upload · Esc cancel"
    } else {
        "Enter send · Ctrl+U upload · PgUp/PgDn scroll · Esc back to hubs"
    };
    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    f.render_widget(
        Paragraph::new(format!("{}{}", padding, hints)).style(theme::hint()),
        area,
    );
}

fn render_upload_prompt(f: &mut Frame, screen: &ChatScreen, area: Rect) {
    let popup = layout::centered(area, layout::MODAL_WIDTH, layout::MODAL_HEIGHT);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true))
        .title(Span::styled(" Upload Document ", theme::title()))
        .style(Style::default().bg(theme::BG_MODAL));
    let inner = layout::with_modal_padding(block.inner(popup));
    f.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(inner);

    f.render_widget(
        Paragraph::new(format!("Hub: {}", screen.hub_name())).style(Style::default().fg(theme::TEXT_PRIMARY)),
        chunks[0],
    );

    let selection = screen.upload.selection();
    let path = if selection.is_empty() {
        Paragraph::new("Type or drop a file path").style(Style::default().fg(theme::TEXT_DIM))
    } else {
        let visible = (chunks[2].width as usize).saturating_sub(3);
        let chars: Vec<char> = selection.chars().collect();
        let start = chars.len().saturating_sub(visible);
        let tail: String = chars[start..].iter().collect();
        Paragraph::new(format!("{}▏", tail)).style(Style::default().fg(theme::TEXT_PRIMARY))
    };
    f.render_widget(
        path.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(true))
                .style(Style::default().bg(theme::BG_INPUT)),
        ),
        chunks[2],
    );

    f.render_widget(
        Paragraph::new(format!("Accepted: {}", DocumentKind::accepted_list())).style(theme::hint()),
        chunks[3],
    );
}
