// Centralized theme: every color and shared style used by the views lives here

use ratatui::style::{Color, Modifier, Style};
use khub_core::models::Role;

// =============================================================================
// BACKGROUNDS
// =============================================================================

/// App background - pure black for contrast
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Card/message background - very subtle lift from black
pub const BG_CARD: Color = Color::Rgb(18, 18, 18);

/// Selected hub card background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Status bar background
pub const BG_STATUSBAR: Color = Color::Rgb(12, 12, 12);

/// Input field background
pub const BG_INPUT: Color = Color::Rgb(18, 18, 18);

/// Modal content background
pub const BG_MODAL: Color = Color::Rgb(22, 22, 26);

// =============================================================================
// TEXT
// =============================================================================

/// Primary text - off-white for readability
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Dimmed text for hints, placeholders
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

// =============================================================================
// ACCENTS
// =============================================================================

/// Primary accent - muted blue (interactive elements, focus, user turns)
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Muted purple - assistant turns and hub icons
pub const ACCENT_SPECIAL: Color = Color::Rgb(169, 154, 203);

pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// =============================================================================
// STYLE HELPERS
// =============================================================================

pub fn role_color(role: Role) -> Color {
    match role {
        Role::User => ACCENT_PRIMARY,
        Role::Assistant => ACCENT_SPECIAL,
    }
}

pub fn title() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn hint() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT_PRIMARY)
    } else {
        Style::default().fg(BORDER_INACTIVE)
    }
}

/// Style for a button-like label; disabled buttons are dimmed
pub fn button(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(ACCENT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}
