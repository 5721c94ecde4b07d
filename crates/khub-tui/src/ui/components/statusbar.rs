use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

/// Bottom line: current toast on the left, backend URL on the right.
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    current_notification: Option<&Notification>,
    backend_url: &str,
) {
    let url_label = format!(" {} ", backend_url);
    let url_width = (url_label.width() as u16).min(area.width / 2);

    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(url_width)]).split(area);
    let notification_area = chunks[0];
    let url_area = chunks[1];

    let notification_paragraph = if let Some(notification) = current_notification {
        let color = match notification.level {
            NotificationLevel::Info => theme::ACCENT_PRIMARY,
            NotificationLevel::Success => theme::ACCENT_SUCCESS,
            NotificationLevel::Warning => theme::ACCENT_WARNING,
            NotificationLevel::Error => theme::ACCENT_ERROR,
        };
        let icon = notification.level.icon();
        let available = (notification_area.width as usize).saturating_sub(icon.width() + 2);
        let message = truncate_with_ellipsis(&notification.message, available);

        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(message, Style::default().fg(color)),
        ]))
    } else {
        Paragraph::new("")
    };
    f.render_widget(
        notification_paragraph.style(Style::default().bg(theme::BG_STATUSBAR)),
        notification_area,
    );

    let url = truncate_with_ellipsis(&url_label, url_area.width as usize);
    f.render_widget(
        Paragraph::new(url).style(Style::default().fg(theme::TEXT_DIM).bg(theme::BG_STATUSBAR)),
        url_area,
    );
}

/// Truncate to `max_width` display columns, ending in "..." when cut.
/// Grapheme-aware so wide characters are never split.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let (target, suffix) = if max_width <= 3 {
        (max_width, "")
    } else {
        (max_width - 3, "...")
    };

    let mut current_width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > target {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }
    result.push_str(suffix);
    result
}
