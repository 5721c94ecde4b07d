pub mod app;
pub mod components;
pub mod layout;
pub mod notifications;
pub mod services;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod views;

pub use app::{App, View};
pub use terminal::{init as init_terminal, restore as restore_terminal, Tui};
