mod animation_clock;
mod notification_manager;

pub use animation_clock::AnimationClock;
pub use notification_manager::NotificationManager;
