use std::time::Duration;

use khub_core::models::Hub;
use khub_core::session::{CreateOutcome, SendRejected, UploadAck};
use tracing::debug;

use crate::backend::{BackendEvent, Command};
use crate::ui::notifications::Notification;
use crate::ui::services::{AnimationClock, NotificationManager};
use crate::ui::state::{ChatScreen, HomeState, HubsFocus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Hubs,
    Chat,
}

pub struct App {
    pub running: bool,
    /// First Ctrl+C arms this; the second one quits
    pub pending_quit: bool,
    pub view: View,
    pub home: HomeState,
    /// Present exactly while `view == View::Chat`
    pub chat: Option<ChatScreen>,
    backend_url: String,
    animation: AnimationClock,
    notifications: NotificationManager,
}

impl App {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            running: true,
            pending_quit: false,
            view: View::Hubs,
            home: HomeState::default(),
            chat: None,
            backend_url: backend_url.into(),
            animation: AnimationClock::new(),
            notifications: NotificationManager::new(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Called on every render tick
    pub fn tick(&mut self) {
        self.animation.tick();
        self.notifications.tick();
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn spinner_char(&self) -> char {
        self.animation.spinner_char()
    }

    pub fn ellipsis(&self) -> &'static str {
        self.animation.ellipsis()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.notify(notification);
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show the hub list. Every activation re-fetches the full listing and
    /// drops any open chat session.
    pub fn activate_hubs(&mut self) -> Command {
        self.view = View::Hubs;
        self.chat = None;
        let generation = self.home.hubs.begin_refresh();
        Command::RefreshHubs { generation }
    }

    pub fn open_hub(&mut self, hub: Hub) {
        debug!(hub = %hub, "opening chat");
        self.chat = Some(ChatScreen::new(hub));
        self.view = View::Chat;
    }

    pub fn open_selected_hub(&mut self) {
        if let Some(hub) = self.home.selected_hub().cloned() {
            self.open_hub(hub);
        }
    }

    // =========================================================================
    // Hub list actions
    // =========================================================================

    pub fn refresh_hubs(&mut self) -> Option<Command> {
        if self.home.hubs.is_loading() {
            return None;
        }
        let generation = self.home.hubs.begin_refresh();
        self.notify(Notification::info("Refreshing hubs").duration(Duration::from_secs(1)));
        Some(Command::RefreshHubs { generation })
    }

    pub fn submit_new_hub(&mut self) -> Option<Command> {
        self.home.hubs.begin_create().map(Command::CreateHub)
    }

    pub fn toggle_hubs_focus(&mut self) {
        self.home.focus = match self.home.focus {
            HubsFocus::Grid => HubsFocus::CreateForm,
            HubsFocus::CreateForm => HubsFocus::Grid,
        };
    }

    // =========================================================================
    // Chat actions
    // =========================================================================

    pub fn submit_chat(&mut self) -> Option<Command> {
        let screen = self.chat.as_mut()?;
        match screen.session.submit() {
            Ok(pending) => {
                screen.scroll_from_bottom = 0;
                Some(Command::SendChat(pending))
            }
            Err(SendRejected::Empty) => None,
            Err(SendRejected::Pending) => {
                debug!("reply still pending; submission ignored");
                None
            }
        }
    }

    /// Open the file prompt unless an upload is already running
    pub fn open_upload_prompt(&mut self) {
        if let Some(screen) = self.chat.as_mut() {
            if !screen.upload.is_in_progress() {
                screen.upload_prompt_open = true;
            }
        }
    }

    pub fn close_upload_prompt(&mut self) {
        if let Some(screen) = self.chat.as_mut() {
            screen.upload_prompt_open = false;
            screen.upload.clear_selection();
        }
    }

    pub fn submit_upload(&mut self) -> Option<Command> {
        let screen = self.chat.as_mut()?;
        let hub_name = screen.hub_name().to_string();
        let upload = screen.upload.begin(&hub_name)?;
        screen.upload_prompt_open = false;
        Some(Command::Upload {
            session_id: screen.session.id(),
            upload,
        })
    }

    /// Route typed or pasted text to whichever input currently has focus
    pub fn insert_text(&mut self, text: &str) {
        match self.view {
            View::Hubs if self.home.focus == HubsFocus::CreateForm => {
                text.chars()
                    .filter(|c| !c.is_control())
                    .for_each(|c| self.home.hubs.push_char(c));
            }
            View::Hubs => {}
            View::Chat => {
                let Some(screen) = self.chat.as_mut() else {
                    return;
                };
                if screen.upload_prompt_open {
                    text.chars()
                        .filter(|c| !c.is_control())
                        .for_each(|c| screen.upload.push_char(c));
                } else {
                    text.chars()
                        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                        .filter(|c| !c.is_control())
                        .for_each(|c| screen.session.push_char(c));
                }
            }
        }
    }

    // =========================================================================
    // Resolved backend calls
    // =========================================================================

    /// Apply a resolved call. May return a follow-up (create → re-fetch).
    pub fn handle_backend_event(&mut self, event: BackendEvent) -> Option<Command> {
        match event {
            BackendEvent::HubsLoaded { generation, result } => {
                if self.home.hubs.finish_refresh(generation, result).is_some() {
                    self.notify(Notification::warning("Failed to fetch hubs"));
                }
                self.home.clamp_selection();
                None
            }
            BackendEvent::HubCreated { name, result } => {
                match self.home.hubs.finish_create(name, result) {
                    CreateOutcome::Created { name, message } => {
                        let text = message.unwrap_or_else(|| format!("Hub '{}' created", name));
                        self.notify(Notification::success(text));
                        let generation = self.home.hubs.begin_refresh();
                        Some(Command::RefreshHubs { generation })
                    }
                    CreateOutcome::Failed { name } => {
                        self.notify(Notification::error(format!("Failed to create hub '{}'", name)));
                        None
                    }
                }
            }
            BackendEvent::ChatReplied { session_id, result } => {
                match self.chat.as_mut() {
                    Some(screen) if screen.session.id() == session_id => {
                        screen.session.complete(result);
                        screen.scroll_from_bottom = 0;
                    }
                    _ => debug!(session_id, "dropping chat reply for a closed session"),
                }
                None
            }
            BackendEvent::UploadFinished { session_id, result } => {
                let ack = match self.chat.as_mut() {
                    Some(screen) if screen.session.id() == session_id => {
                        screen.upload.finish(result)
                    }
                    // The document was still ingested; tell the user even though the view is gone
                    _ => UploadAck::for_result(&result),
                };
                self.notify(Notification::from_upload_ack(&ack));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khub_core::models::{ChatReply, Message, Role};
    use khub_core::ApiError;
    use crate::ui::notifications::NotificationLevel;

    fn app_in_chat(hub: &str) -> App {
        let mut app = App::new("http://localhost:8000/api/v1");
        app.open_hub(Hub::new(hub));
        app
    }

    fn chat(app: &App) -> &ChatScreen {
        app.chat.as_ref().expect("chat view open")
    }

    #[test]
    fn test_hello_scenario() {
        let mut app = app_in_chat("Recipes");
        app.insert_text("Hello");

        let command = app.submit_chat().expect("request issued");
        let session_id = chat(&app).session.id();
        assert_eq!(
            chat(&app).session.transcript().messages(),
            &[Message::user("Hello")]
        );
        assert!(chat(&app).session.is_pending());
        match command {
            Command::SendChat(pending) => {
                assert_eq!(pending.hub_name, "Recipes");
                assert_eq!(pending.message, "Hello");
            }
            other => panic!("unexpected command {other:?}"),
        }

        app.handle_backend_event(BackendEvent::ChatReplied {
            session_id,
            result: Ok(ChatReply {
                response: "<reply>".to_string(),
                context: Vec::new(),
            }),
        });
        assert_eq!(
            chat(&app).session.transcript().messages(),
            &[Message::user("Hello"), Message::assistant("<reply>")]
        );
        assert!(!chat(&app).session.is_pending());
    }

    #[test]
    fn test_rejected_chat_gets_fallback_turn() {
        let mut app = app_in_chat("Recipes");
        app.insert_text("Hello");
        app.submit_chat().unwrap();
        let session_id = chat(&app).session.id();

        app.handle_backend_event(BackendEvent::ChatReplied {
            session_id,
            result: Err(ApiError::Status {
                status: 500,
                body: String::new(),
            }),
        });
        let last = chat(&app).session.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(
            last.content,
            "Sorry, I encountered an error processing your request."
        );
        // Fallback never surfaces as a toast
        assert!(app.current_notification().is_none());
    }

    #[test]
    fn test_submit_blocked_while_pending() {
        let mut app = app_in_chat("Recipes");
        app.insert_text("one");
        assert!(app.submit_chat().is_some());

        app.insert_text("two");
        assert!(app.submit_chat().is_none());
        assert_eq!(chat(&app).session.transcript().len(), 1);
    }

    #[test]
    fn test_whitespace_submit_does_nothing() {
        let mut app = app_in_chat("Recipes");
        app.insert_text("   ");
        assert!(app.submit_chat().is_none());
        assert!(chat(&app).session.transcript().is_empty());
    }

    #[test]
    fn test_reply_for_closed_session_is_dropped() {
        let mut app = app_in_chat("Recipes");
        app.insert_text("Hello");
        app.submit_chat().unwrap();
        let old_id = chat(&app).session.id();

        app.activate_hubs();
        app.open_hub(Hub::new("Recipes"));
        app.handle_backend_event(BackendEvent::ChatReplied {
            session_id: old_id,
            result: Ok(ChatReply {
                response: "late".to_string(),
                context: Vec::new(),
            }),
        });
        assert!(chat(&app).session.transcript().is_empty());
    }

    #[test]
    fn test_upload_without_selection_issues_nothing() {
        let mut app = app_in_chat("Recipes");
        app.open_upload_prompt();
        assert!(app.submit_upload().is_none());
        assert!(chat(&app).upload_prompt_open);
    }

    #[test]
    fn test_upload_round_trip_resets_selection() {
        let mut app = app_in_chat("Recipes");
        app.open_upload_prompt();
        app.insert_text("/tmp/soup.txt");

        let command = app.submit_upload().expect("upload issued");
        let session_id = chat(&app).session.id();
        assert!(chat(&app).upload.is_in_progress());
        assert!(!chat(&app).upload_prompt_open);
        assert!(matches!(command, Command::Upload { .. }));

        // Trigger is disabled while running
        app.open_upload_prompt();
        assert!(!chat(&app).upload_prompt_open);

        app.handle_backend_event(BackendEvent::UploadFinished {
            session_id,
            result: Err(ApiError::Backend("nope".to_string())),
        });
        assert!(!chat(&app).upload.is_in_progress());
        assert_eq!(chat(&app).upload.selection(), "");
        let toast = app.current_notification().unwrap();
        assert_eq!(toast.level, NotificationLevel::Error);
        assert_eq!(toast.message, "Failed to upload file.");
    }

    #[test]
    fn test_create_hub_then_refetch() {
        let mut app = App::new("http://localhost:8000/api/v1");
        let Command::RefreshHubs { generation } = app.activate_hubs() else {
            panic!("activation must fetch the listing");
        };
        app.handle_backend_event(BackendEvent::HubsLoaded {
            generation,
            result: Ok(Vec::new()),
        });
        assert!(app.home.hubs.shows_empty_state());

        app.toggle_hubs_focus();
        app.insert_text("FinanceDocs");
        let command = app.submit_new_hub().unwrap();
        assert_eq!(command, Command::CreateHub("FinanceDocs".to_string()));

        let follow_up = app.handle_backend_event(BackendEvent::HubCreated {
            name: "FinanceDocs".to_string(),
            result: Ok(None),
        });
        let Some(Command::RefreshHubs { generation }) = follow_up else {
            panic!("create must re-fetch, got {follow_up:?}");
        };
        assert_eq!(app.home.hubs.new_hub_name(), "");
        // Not inserted locally; only the re-fetch adds it
        assert!(app.home.hubs.hubs().is_empty());

        app.handle_backend_event(BackendEvent::HubsLoaded {
            generation,
            result: Ok(vec![Hub::new("FinanceDocs")]),
        });
        assert_eq!(app.home.hubs.hubs(), &[Hub::new("FinanceDocs")]);
    }

    #[test]
    fn test_startup_listing_arriving_after_refetch_is_ignored() {
        let mut app = App::new("http://localhost:8000/api/v1");
        let Command::RefreshHubs { generation: startup } = app.activate_hubs() else {
            panic!("activation must fetch the listing");
        };

        app.toggle_hubs_focus();
        app.insert_text("FinanceDocs");
        app.submit_new_hub().unwrap();
        let follow_up = app.handle_backend_event(BackendEvent::HubCreated {
            name: "FinanceDocs".to_string(),
            result: Ok(None),
        });
        let Some(Command::RefreshHubs { generation: refetch }) = follow_up else {
            panic!("create must re-fetch, got {follow_up:?}");
        };

        app.handle_backend_event(BackendEvent::HubsLoaded {
            generation: refetch,
            result: Ok(vec![Hub::new("FinanceDocs")]),
        });
        app.handle_backend_event(BackendEvent::HubsLoaded {
            generation: startup,
            result: Ok(Vec::new()),
        });

        assert_eq!(app.home.hubs.hubs(), &[Hub::new("FinanceDocs")]);
        assert!(!app.home.hubs.is_loading());
    }

    #[test]
    fn test_failed_create_surfaces_error() {
        let mut app = App::new("http://localhost:8000/api/v1");
        app.toggle_hubs_focus();
        app.insert_text("Broken");
        app.submit_new_hub().unwrap();

        let follow_up = app.handle_backend_event(BackendEvent::HubCreated {
            name: "Broken".to_string(),
            result: Err(ApiError::Backend("down".to_string())),
        });
        assert!(follow_up.is_none());
        assert_eq!(app.home.hubs.new_hub_name(), "Broken");
        assert_eq!(
            app.current_notification().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
    }

    #[test]
    fn test_leaving_chat_discards_transcript() {
        let mut app = app_in_chat("Recipes");
        app.insert_text("Hello");
        app.submit_chat().unwrap();

        assert!(matches!(app.activate_hubs(), Command::RefreshHubs { .. }));
        assert!(app.chat.is_none());
        assert_eq!(app.view, View::Hubs);
    }
}
