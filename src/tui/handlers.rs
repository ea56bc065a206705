use crate::checklist::models::View;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    /// `ctrl+c` quits from anywhere; `q` only outside the text field.
    pub fn is_quit(key_event: KeyEvent, view: View) -> bool {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('q') => view == View::List && key_event.modifiers.is_empty(),
            _ => false,
        }
    }

    /// Key repeats and releases are reported on some platforms; only presses
    /// drive the state machine.
    pub fn is_press(key_event: &KeyEvent) -> bool {
        key_event.kind != KeyEventKind::Release
    }

    pub fn handle_list_mode_key(key_event: KeyEvent) -> ListModeAction {
        match key_event.code {
            KeyCode::Char('a') => ListModeAction::EnterAddMode,
            KeyCode::Up | KeyCode::Char('k') => ListModeAction::MoveCursorUp,
            KeyCode::Down | KeyCode::Char('j') => ListModeAction::MoveCursorDown,
            KeyCode::Char('d') => ListModeAction::DeleteItem,
            KeyCode::Enter | KeyCode::Char(' ') => ListModeAction::ToggleSelected,
            _ => ListModeAction::None,
        }
    }

    pub fn handle_add_mode_key(key_event: KeyEvent) -> AddModeAction {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Enter => AddModeAction::Confirm,
            KeyCode::Esc => AddModeAction::Cancel,
            KeyCode::Tab => AddModeAction::SwitchToList,
            KeyCode::Backspace => AddModeAction::Backspace,
            KeyCode::Delete => AddModeAction::Delete,
            KeyCode::Left => AddModeAction::MoveCursorLeft,
            KeyCode::Right => AddModeAction::MoveCursorRight,
            KeyCode::Home => AddModeAction::MoveCursorHome,
            KeyCode::End => AddModeAction::MoveCursorEnd,
            KeyCode::Char('a') if ctrl => AddModeAction::MoveCursorHome,
            KeyCode::Char('e') if ctrl => AddModeAction::MoveCursorEnd,
            KeyCode::Char('w') if ctrl => AddModeAction::DeleteWordBackward,
            KeyCode::Char('u') if ctrl => AddModeAction::DeleteToStart,
            KeyCode::Char('k') if ctrl => AddModeAction::DeleteToEnd,
            KeyCode::Char(_) if ctrl => AddModeAction::None,
            KeyCode::Char(c) => AddModeAction::InsertChar(c),
            _ => AddModeAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ListModeAction {
    None,
    EnterAddMode,
    MoveCursorUp,
    MoveCursorDown,
    DeleteItem,
    ToggleSelected,
}

#[derive(Debug, PartialEq)]
pub enum AddModeAction {
    None,
    Confirm,
    Cancel,
    SwitchToList,
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    DeleteWordBackward,
    DeleteToStart,
    DeleteToEnd,
    InsertChar(char),
}
