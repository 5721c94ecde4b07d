// Layout constants shared by both views

use ratatui::layout::Rect;

/// Horizontal padding for main content areas (left + right)
pub const CONTENT_PADDING_H: u16 = 2;

/// Horizontal padding for modal content
pub const MODAL_PADDING_H: u16 = 2;

/// Header height for both views (title + subtitle/spacing)
pub const HEADER_HEIGHT: u16 = 3;

/// Create-hub form (bordered input + button line)
pub const CREATE_FORM_HEIGHT: u16 = 4;

/// Hub card height inside the grid (border + name + "Chat now" + border)
pub const HUB_CARD_HEIGHT: u16 = 4;

/// Minimum hub card width; the grid fits as many columns as this allows
pub const HUB_CARD_MIN_WIDTH: u16 = 26;

/// Chat input box (border + text + border)
pub const CHAT_INPUT_HEIGHT: u16 = 3;

/// Footer (key hints) height
pub const FOOTER_HEIGHT: u16 = 1;

/// Status bar height (single line at very bottom)
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Upload prompt width cap
pub const MODAL_WIDTH: u16 = 70;

/// Upload prompt height
pub const MODAL_HEIGHT: u16 = 9;

/// Apply horizontal padding to a Rect (reduces width and shifts x)
#[inline]
pub fn with_horizontal_padding(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y,
        width: area.width.saturating_sub(padding * 2),
        height: area.height,
    }
}

#[inline]
pub fn with_content_padding(area: Rect) -> Rect {
    with_horizontal_padding(area, CONTENT_PADDING_H)
}

#[inline]
pub fn with_modal_padding(area: Rect) -> Rect {
    with_horizontal_padding(area, MODAL_PADDING_H)
}

/// Number of hub card columns that fit in `width`
pub fn hub_grid_columns(width: u16) -> usize {
    (width / HUB_CARD_MIN_WIDTH).clamp(1, 3) as usize
}

/// Centered rect of at most `max_width` x `height` inside `area`
pub fn centered(area: Rect, max_width: u16, height: u16) -> Rect {
    let width = max_width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
