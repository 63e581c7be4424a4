//! Key bindings (normal and vim-style) and mouse clicks.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Toggle the card under the cursor; also starts a round from the title.
    Toggle,
    Restart,
    Quit,
    None,
}

/// Map key event to action. Supports both arrows and hjkl.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::CursorLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::CursorRight,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Toggle,
        KeyCode::Char('r' | 'R') => Action::Restart,
        _ => Action::None,
    }
}

/// Terminal position of a left-button press, if this event is one.
pub fn mouse_click(event: MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_and_vim_agree() {
        assert_eq!(key_to_action(key(KeyCode::Left, KeyModifiers::NONE)), Action::CursorLeft);
        assert_eq!(key_to_action(key(KeyCode::Char('h'), KeyModifiers::NONE)), Action::CursorLeft);
        assert_eq!(key_to_action(key(KeyCode::Char('j'), KeyModifiers::NONE)), Action::CursorDown);
        assert_eq!(key_to_action(key(KeyCode::Char(' '), KeyModifiers::NONE)), Action::Toggle);
    }

    #[test]
    fn ctrl_c_quits_other_modifiers_ignored() {
        assert_eq!(key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('h'), KeyModifiers::ALT)), Action::None);
    }

    #[test]
    fn only_left_press_is_a_click() {
        let ev = |kind| MouseEvent {
            kind,
            column: 4,
            row: 9,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(mouse_click(ev(MouseEventKind::Down(MouseButton::Left))), Some((4, 9)));
        assert_eq!(mouse_click(ev(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(mouse_click(ev(MouseEventKind::Down(MouseButton::Right))), None);
    }
}
