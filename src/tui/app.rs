use ratatui::widgets::ListState;

use crate::domain::FeedItem;

use super::sink::ViewEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Items,
    Preview,
}

impl ActivePane {
    pub fn toggle(self) -> Self {
        match self {
            ActivePane::Items => ActivePane::Preview,
            ActivePane::Preview => ActivePane::Items,
        }
    }
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub active_pane: ActivePane,
    /// Mirror of the render buffer, newest first.
    pub items: Vec<FeedItem>,
    pub item_index: usize,
    pub item_list_state: ListState,
    pub preview_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub is_refreshing: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut item_list_state = ListState::default();
        item_list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Items,
            items: Vec::new(),
            item_index: 0,
            item_list_state,
            preview_scroll: 0,
            should_quit: false,
            status_message: None,
            is_refreshing: false,
        }
    }

    pub fn selected_item(&self) -> Option<&FeedItem> {
        self.items.get(self.item_index)
    }

    /// Apply a list mutation, keeping the selected item selected.
    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Insert { index, item } => {
                let index = index.min(self.items.len());
                let had_items = !self.items.is_empty();
                self.items.insert(index, item);
                if had_items && index <= self.item_index {
                    self.item_index += 1;
                }
            }
            ViewEvent::RemoveLast => {
                self.items.pop();
                if self.item_index >= self.items.len() {
                    self.item_index = self.items.len().saturating_sub(1);
                    self.preview_scroll = 0;
                }
            }
            ViewEvent::Busy(busy) => {
                self.is_refreshing = busy;
            }
            ViewEvent::Notice(message) => {
                self.set_status(message);
            }
        }
        self.sync_list_state();
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Items => {
                if self.item_index > 0 {
                    self.item_index -= 1;
                    self.preview_scroll = 0;
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1);
            }
        }
        self.sync_list_state();
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Items => {
                if self.item_index + 1 < self.items.len() {
                    self.item_index += 1;
                    self.preview_scroll = 0;
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(1);
            }
        }
        self.sync_list_state();
    }

    pub fn next_page(&mut self) {
        match self.active_pane {
            ActivePane::Items => {
                let last = self.items.len().saturating_sub(1);
                self.item_index = (self.item_index + PAGE_SIZE).min(last);
                self.preview_scroll = 0;
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(PAGE_SIZE as u16);
            }
        }
        self.sync_list_state();
    }

    pub fn prev_page(&mut self) {
        match self.active_pane {
            ActivePane::Items => {
                self.item_index = self.item_index.saturating_sub(PAGE_SIZE);
                self.preview_scroll = 0;
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(PAGE_SIZE as u16);
            }
        }
        self.sync_list_state();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn sync_list_state(&mut self) {
        self.item_list_state.select(if self.items.is_empty() {
            None
        } else {
            Some(self.item_index)
        });
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Published;

    fn item(id: &str) -> FeedItem {
        FeedItem {
            id: id.into(),
            title: id.into(),
            link: "#".into(),
            published_at: Published::Invalid,
            summary: String::new(),
            source_name: "Feed".into(),
        }
    }

    fn insert(app: &mut TuiApp, id: &str) {
        app.apply(ViewEvent::Insert {
            index: 0,
            item: item(id),
        });
    }

    #[test]
    fn test_insert_keeps_selection_on_same_item() {
        let mut app = TuiApp::new();
        insert(&mut app, "a");
        insert(&mut app, "b");
        assert_eq!(app.selected_item().unwrap().id, "a");

        app.move_up();
        assert_eq!(app.selected_item().unwrap().id, "b");
        insert(&mut app, "c");
        assert_eq!(app.selected_item().unwrap().id, "b");
        assert_eq!(app.item_list_state.selected(), Some(1));
    }

    #[test]
    fn test_remove_last_clamps_selection() {
        let mut app = TuiApp::new();
        insert(&mut app, "a");
        insert(&mut app, "b");
        app.item_index = 1;

        app.apply(ViewEvent::RemoveLast);
        assert_eq!(app.items.len(), 1);
        assert_eq!(app.selected_item().unwrap().id, "b");

        app.apply(ViewEvent::RemoveLast);
        assert!(app.selected_item().is_none());
        assert_eq!(app.item_list_state.selected(), None);
    }

    #[test]
    fn test_busy_and_notice() {
        let mut app = TuiApp::new();
        app.apply(ViewEvent::Busy(true));
        assert!(app.is_refreshing);
        app.apply(ViewEvent::Notice("BBC World: HTTP status 500".into()));
        assert_eq!(app.status_message.as_deref(), Some("BBC World: HTTP status 500"));
        app.apply(ViewEvent::Busy(false));
        assert!(!app.is_refreshing);
    }

    #[test]
    fn test_paging_stays_in_bounds() {
        let mut app = TuiApp::new();
        for i in 0..15 {
            insert(&mut app, &format!("i{}", i));
        }
        app.item_index = 0;
        app.next_page();
        assert_eq!(app.item_index, 10);
        app.next_page();
        assert_eq!(app.item_index, 14);
        app.prev_page();
        app.prev_page();
        assert_eq!(app.item_index, 0);
    }

    #[test]
    fn test_pane_toggle_scrolls_preview() {
        let mut app = TuiApp::new();
        app.active_pane = app.active_pane.toggle();
        assert_eq!(app.active_pane, ActivePane::Preview);
        app.move_down();
        app.move_down();
        assert_eq!(app.preview_scroll, 2);
        app.move_up();
        assert_eq!(app.preview_scroll, 1);
    }
}
