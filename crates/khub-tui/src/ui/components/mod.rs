mod statusbar;

pub use statusbar::{render_statusbar, truncate_with_ellipsis};
