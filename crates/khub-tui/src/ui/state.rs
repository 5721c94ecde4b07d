use khub_core::models::Hub;
use khub_core::session::{ChatSession, HubListState, UploadState};

/// Which part of the hub list view receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HubsFocus {
    #[default]
    Grid,
    CreateForm,
}

/// Hub list view: listing contract state plus grid selection.
#[derive(Debug, Default)]
pub struct HomeState {
    pub hubs: HubListState,
    pub selected: usize,
    pub focus: HubsFocus,
    /// Card columns at the last render; drives up/down navigation
    pub grid_columns: usize,
}

impl HomeState {
    pub fn selected_hub(&self) -> Option<&Hub> {
        self.hubs.hubs().get(self.selected)
    }

    /// Move the grid cursor. `columns` is the current grid width in cards.
    pub fn move_selection(&mut self, dx: isize, dy: isize, columns: usize) {
        let count = self.hubs.hubs().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let columns = columns.max(1) as isize;
        let target = self.selected as isize + dx + dy * columns;
        self.selected = target.clamp(0, count as isize - 1) as usize;
    }

    /// Keep the cursor on a real card after the listing changes
    pub fn clamp_selection(&mut self) {
        let count = self.hubs.hubs().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

/// Everything the chat view owns. Dropped when the user leaves the view.
#[derive(Debug)]
pub struct ChatScreen {
    pub session: ChatSession,
    pub upload: UploadState,
    pub upload_prompt_open: bool,
    /// Lines scrolled up from the bottom of the transcript (0 = follow newest)
    pub scroll_from_bottom: u16,
}

impl ChatScreen {
    pub fn new(hub: Hub) -> Self {
        Self {
            session: ChatSession::new(hub),
            upload: UploadState::new(),
            upload_prompt_open: false,
            scroll_from_bottom: 0,
        }
    }

    pub fn hub_name(&self) -> &str {
        &self.session.hub().name
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    /// Keep the offset within what the last render could actually show
    pub fn clamp_scroll(&mut self, max_scroll: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_with(names: &[&str]) -> HomeState {
        let mut home = HomeState::default();
        let generation = home.hubs.begin_refresh();
        home.hubs
            .finish_refresh(generation, Ok(names.iter().map(|n| Hub::new(*n)).collect()));
        home
    }

    #[test]
    fn test_grid_navigation_clamps() {
        let mut home = home_with(&["a", "b", "c", "d", "e"]);
        home.move_selection(0, 1, 3);
        assert_eq!(home.selected, 3);
        home.move_selection(0, 1, 3);
        assert_eq!(home.selected, 4);
        home.move_selection(-10, 0, 3);
        assert_eq!(home.selected, 0);
        assert_eq!(home.selected_hub().map(|h| h.name.as_str()), Some("a"));
    }

    #[test]
    fn test_clamp_after_shrinking_listing() {
        let mut home = home_with(&["a", "b", "c"]);
        home.selected = 2;
        let generation = home.hubs.begin_refresh();
        home.hubs.finish_refresh(generation, Ok(vec![Hub::new("a")]));
        home.clamp_selection();
        assert_eq!(home.selected, 0);
    }

    #[test]
    fn test_empty_grid_selection() {
        let mut home = home_with(&[]);
        home.move_selection(1, 1, 2);
        assert_eq!(home.selected, 0);
        assert!(home.selected_hub().is_none());
    }

    #[test]
    fn test_chat_scroll() {
        let mut screen = ChatScreen::new(Hub::new("Recipes"));
        screen.scroll_down(3);
        assert_eq!(screen.scroll_from_bottom, 0);
        screen.scroll_up(5);
        screen.scroll_down(2);
        assert_eq!(screen.scroll_from_bottom, 3);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut screen = ChatScreen::new(Hub::new("Recipes"));
        screen.scroll_up(500);
        screen.clamp_scroll(12);
        assert_eq!(screen.scroll_from_bottom, 12);
        screen.scroll_down(5);
        assert_eq!(screen.scroll_from_bottom, 7);
        screen.clamp_scroll(20);
        assert_eq!(screen.scroll_from_bottom, 7);
    }
}
