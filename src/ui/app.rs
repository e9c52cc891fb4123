use crossterm::event::{ KeyCode, KeyEvent, KeyEventKind, KeyModifiers };
use log::{ debug, info, warn };

use crate::models::chat::{ ChatList, Conversation };

use super::composer::Composer;
use super::FrameRequester;

/// Outcome of handling one key press.
pub enum AppAction {
    None,
    Quit,
}

/// Result of the one-shot startup list call, delivered into the event loop
/// by the fetch task.
#[derive(Debug, Clone)]
pub enum HistoryEvent {
    Loaded(ChatList),
    Failed(String),
}

/// UI state: the conversation view, the composer, and a status line. All
/// mutation happens on the event-loop task.
pub struct AppState {
    pub conversation: Conversation,
    pub composer: Composer,
    /// Manual scroll offset, counted in lines up from the newest message.
    /// Zero means the view sticks to the bottom.
    pub scroll_from_bottom: u16,
    pub status_line: Option<String>,
    seed_history: bool,
    request_frame: FrameRequester,
}

impl AppState {
    pub fn new(seed_history: bool, request_frame: FrameRequester) -> Self {
        Self {
            conversation: Conversation::new(),
            composer: Composer::default(),
            scroll_from_bottom: 0,
            status_line: None,
            seed_history,
            request_frame,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => AppAction::Quit,
                _ => AppAction::None,
            };
        }

        match key.code {
            // The confirm gesture. Enter on its own only breaks the line.
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => self.submit(),
            KeyCode::Enter => {
                self.composer.newline();
                self.request_frame.schedule_frame();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.composer.insert_char(ch);
                self.request_frame.schedule_frame();
            }
            KeyCode::Backspace => {
                self.composer.backspace();
                self.request_frame.schedule_frame();
            }
            KeyCode::Delete => {
                self.composer.delete_forward();
                self.request_frame.schedule_frame();
            }
            KeyCode::Left => self.composer.move_left(),
            KeyCode::Right => self.composer.move_right(),
            KeyCode::Home => self.composer.move_line_start(),
            KeyCode::End => self.composer.move_line_end(),
            KeyCode::Up => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(1);
                self.request_frame.schedule_frame();
            }
            KeyCode::Down => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(1);
                self.request_frame.schedule_frame();
            }
            _ => {}
        }

        AppAction::None
    }

    pub fn paste(&mut self, data: &str) {
        self.composer.insert_str(data);
        self.request_frame.schedule_frame();
    }

    pub fn request_redraw(&self) {
        self.request_frame.schedule_frame();
    }

    /// Hand the draft to the conversation and reset the composer. Empty or
    /// whitespace-only drafts go through unchanged.
    fn submit(&mut self) {
        debug!("submitting composer draft ({} bytes)", self.composer.text().len());
        let text = self.composer.take();
        self.conversation.append(text);
        self.scroll_from_bottom = 0;
        self.request_frame.schedule_frame();
    }

    pub fn handle_history(&mut self, event: HistoryEvent) {
        match event {
            HistoryEvent::Loaded(list) => {
                info!("chat list fetched: {} chats", list.chats.len());
                self.status_line = Some(format!("{} chats on server", list.chats.len()));
                if self.seed_history {
                    for chat_id in list.chats {
                        self.conversation.append(chat_id);
                    }
                }
            }
            HistoryEvent::Failed(err) => {
                warn!("chat list fetch failed: {}", err);
                self.status_line = Some(format!("chat list unavailable: {}", err));
            }
        }
        self.request_frame.schedule_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast;

    fn test_app(seed_history: bool) -> AppState {
        let (draw_tx, _) = broadcast::channel(16);
        AppState::new(seed_history, FrameRequester::new(draw_tx))
    }

    fn press(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) -> AppAction {
        app.handle_key(KeyEvent::new(code, modifiers))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn submit(app: &mut AppState) {
        press(app, KeyCode::Enter, KeyModifiers::ALT);
    }

    #[test]
    fn submissions_render_in_trigger_order() {
        let mut app = test_app(false);
        type_text(&mut app, "hello");
        submit(&mut app);
        type_text(&mut app, "world");
        submit(&mut app);

        assert_eq!(app.conversation.messages(), ["hello", "world"]);
    }

    #[test]
    fn enter_without_modifier_does_not_submit() {
        let mut app = test_app(false);
        type_text(&mut app, "hi");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(app.conversation.is_empty());
        assert_eq!(app.composer.text(), "hi\n");
    }

    #[test]
    fn composer_is_empty_after_submit() {
        let mut app = test_app(false);
        type_text(&mut app, "draft");
        submit(&mut app);

        assert!(app.composer.is_empty());
        assert_eq!(app.conversation.messages(), ["draft"]);
    }

    #[test]
    fn empty_draft_submits_as_is() {
        let mut app = test_app(false);
        submit(&mut app);

        assert_eq!(app.conversation.messages(), [""]);
    }

    #[test]
    fn history_result_is_not_merged_by_default() {
        let mut app = test_app(false);
        app.handle_history(HistoryEvent::Loaded(ChatList {
            chats: vec!["abc".into(), "def".into()],
        }));

        assert!(app.conversation.is_empty());
        assert_eq!(app.status_line.as_deref(), Some("2 chats on server"));
    }

    #[test]
    fn history_result_seeds_view_when_enabled() {
        let mut app = test_app(true);
        app.handle_history(HistoryEvent::Loaded(ChatList {
            chats: vec!["abc".into(), "def".into()],
        }));

        assert_eq!(app.conversation.messages(), ["abc", "def"]);
    }

    #[test]
    fn empty_history_leaves_view_unchanged() {
        let mut app = test_app(true);
        app.handle_history(HistoryEvent::Loaded(ChatList { chats: vec![] }));

        assert!(app.conversation.is_empty());
        assert_eq!(app.status_line.as_deref(), Some("0 chats on server"));
    }

    #[test]
    fn history_failure_surfaces_in_status_line() {
        let mut app = test_app(true);
        app.handle_history(HistoryEvent::Failed("connection refused".into()));

        assert!(app.conversation.is_empty());
        let status = app.status_line.expect("status line set");
        assert!(status.contains("connection refused"));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = test_app(false);
        assert!(matches!(
            press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            AppAction::Quit
        ));
    }

    #[test]
    fn paste_lands_in_composer() {
        let mut app = test_app(false);
        app.paste("from clipboard");
        assert_eq!(app.composer.text(), "from clipboard");
        assert!(app.conversation.is_empty());
    }
}
