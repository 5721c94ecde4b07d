mod chat;
mod hubs;

pub use chat::render_chat;
pub use hubs::render_hubs;
