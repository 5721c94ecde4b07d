use crate::ui::notifications::{Notification, NotificationQueue};

/// Owns the toast queue on behalf of [`App`](crate::ui::App).
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: NotificationQueue,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn tick(&mut self) {
        self.notifications.tick();
    }

    pub fn dismiss(&mut self) {
        self.notifications.dismiss();
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notifications.current()
    }
}
