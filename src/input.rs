//! Keyboard input handling.
//!
//! Maps terminal key events to [`Screen`] changes. Actions that reach the
//! engine (submitting a URL, previewing a post) are returned as a
//! [`Command`] for the main loop to carry out.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::{Mode, Screen};
use crate::view::TuiView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the typed URL as a new feed.
    Submit(String),
    /// Preview the post with this rendered id.
    Preview(String),
}

/// Process a single key event.
///
/// Only reacts to key-press events so each physical keypress triggers
/// exactly one action.
pub fn handle_key_event(screen: &mut Screen, view: &TuiView, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        screen.quit = true;
        return None;
    }

    match screen.mode {
        Mode::Editing => handle_editing(screen, view, key.code),
        Mode::Normal if screen.preview_open => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
                screen.preview_open = false;
            }
            None
        }
        Mode::Normal => handle_normal(screen, view, key.code),
    }
}

fn handle_editing(screen: &mut Screen, view: &TuiView, code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Esc => screen.mode = Mode::Normal,
        // Read-only while a submission is loading.
        _ if view.input_locked => {}
        KeyCode::Enter => {
            let url = screen.input.trim().to_string();
            if !url.is_empty() {
                screen.input.clear();
                screen.mode = Mode::Normal;
            }
            return Some(Command::Submit(url));
        }
        KeyCode::Backspace => {
            screen.input.pop();
        }
        KeyCode::Char(c) => screen.input.push(c),
        _ => {}
    }
    None
}

fn handle_normal(screen: &mut Screen, view: &TuiView, code: KeyCode) -> Option<Command> {
    let len = view.posts.len();
    match code {
        KeyCode::Char('q') | KeyCode::Esc => screen.quit = true,
        KeyCode::Char('a') | KeyCode::Char('/') => screen.mode = Mode::Editing,
        KeyCode::Down | KeyCode::Char('j') => screen.select_next(len),
        KeyCode::Up | KeyCode::Char('k') => screen.select_previous(len),
        KeyCode::Home | KeyCode::Char('g') => screen.select_first(len),
        KeyCode::End | KeyCode::Char('G') => screen.select_last(len),
        KeyCode::Enter | KeyCode::Char('p') => {
            let post = screen.list_state.selected().and_then(|i| view.posts.get(i))?;
            screen.preview_open = true;
            return Some(Command::Preview(post.id.to_string()));
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PostId;
    use crate::view::PostRow;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_with_posts(n: u64) -> TuiView {
        TuiView {
            posts: (1..=n)
                .map(|i| PostRow {
                    id: PostId(i * 10),
                    title: format!("P{i}"),
                    date: None,
                    feed_title: String::new(),
                    viewed: false,
                })
                .collect(),
            ..TuiView::default()
        }
    }

    fn type_str(screen: &mut Screen, view: &TuiView, s: &str) {
        for c in s.chars() {
            handle_key_event(screen, view, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_enter_submits_url() {
        let mut screen = Screen::new();
        let view = TuiView::default();

        handle_key_event(&mut screen, &view, press(KeyCode::Char('a')));
        assert_eq!(screen.mode, Mode::Editing);
        type_str(&mut screen, &view, "https://example.com/rss");

        let cmd = handle_key_event(&mut screen, &view, press(KeyCode::Enter));
        assert_eq!(cmd, Some(Command::Submit("https://example.com/rss".into())));
        assert!(screen.input.is_empty());
        assert_eq!(screen.mode, Mode::Normal);
    }

    #[test]
    fn q_while_editing_is_text_not_quit() {
        let mut screen = Screen::new();
        let view = TuiView::default();
        handle_key_event(&mut screen, &view, press(KeyCode::Char('/')));
        type_str(&mut screen, &view, "q");
        assert!(!screen.quit);
        assert_eq!(screen.input, "q");

        handle_key_event(&mut screen, &view, press(KeyCode::Backspace));
        assert!(screen.input.is_empty());
    }

    #[test]
    fn empty_submission_still_validates() {
        let mut screen = Screen::new();
        let view = TuiView::default();
        handle_key_event(&mut screen, &view, press(KeyCode::Char('a')));
        let cmd = handle_key_event(&mut screen, &view, press(KeyCode::Enter));
        assert_eq!(cmd, Some(Command::Submit(String::new())));
        assert_eq!(screen.mode, Mode::Editing);
    }

    #[test]
    fn locked_input_ignores_keys() {
        let mut screen = Screen::new();
        let view = TuiView {
            input_locked: true,
            ..TuiView::default()
        };
        handle_key_event(&mut screen, &view, press(KeyCode::Char('a')));
        type_str(&mut screen, &view, "xyz");
        assert!(screen.input.is_empty());
        assert_eq!(handle_key_event(&mut screen, &view, press(KeyCode::Enter)), None);
    }

    #[test]
    fn preview_uses_selected_post_id() {
        let mut screen = Screen::new();
        let view = view_with_posts(3);

        assert_eq!(handle_key_event(&mut screen, &view, press(KeyCode::Enter)), None);

        handle_key_event(&mut screen, &view, press(KeyCode::Down));
        handle_key_event(&mut screen, &view, press(KeyCode::Char('j')));
        let cmd = handle_key_event(&mut screen, &view, press(KeyCode::Char('p')));
        assert_eq!(cmd, Some(Command::Preview("20".into())));
        assert!(screen.preview_open);

        handle_key_event(&mut screen, &view, press(KeyCode::Esc));
        assert!(!screen.preview_open);
        assert!(!screen.quit);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let view = TuiView::default();
        let mut screen = Screen::new();
        handle_key_event(&mut screen, &view, press(KeyCode::Char('q')));
        assert!(screen.quit);

        let mut screen = Screen::new();
        screen.mode = Mode::Editing;
        handle_key_event(
            &mut screen,
            &view,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(screen.quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut screen = Screen::new();
        let view = TuiView::default();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut screen, &view, key);
        assert!(!screen.quit);
    }
}
