use crate::checklist::models::{AppState, View};
use crate::store::Store;
use crate::tui::handlers::{AddModeAction, KeyHandler, ListModeAction};
use crate::tui::input::TextInput;
use crate::tui::persistence::Persister;
use anyhow::Result;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    /// Switch to the Add view whenever the list is empty.
    pub empty_list_opens_add: bool,
}

pub struct App<S: Store> {
    pub state: AppState,
    pub input: TextInput,
    pub should_quit: bool,
    options: AppOptions,
    persister: Persister<S>,
}

impl<S: Store> App<S> {
    /// Restores the saved checklist, or seeds a fresh one on first run.
    /// A restored session always opens in the List view.
    pub fn load(mut persister: Persister<S>, options: AppOptions) -> Result<Self> {
        let state = match persister.load()? {
            Some(mut state) => {
                state.view = View::List;
                state
            }
            None => AppState::seeded(),
        };

        let mut app = Self {
            state,
            input: TextInput::new(),
            should_quit: false,
            options,
            persister,
        };
        app.apply_empty_list_policy();
        Ok(app)
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if !KeyHandler::is_press(&key_event) {
            return Ok(());
        }
        if KeyHandler::is_quit(key_event, self.state.view) {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.view {
            View::List => {
                self.handle_list_mode_key(key_event);
                self.apply_empty_list_policy();
            }
            View::Add => self.handle_add_mode_key(key_event),
        }

        self.persister.save(&self.state)?;
        Ok(())
    }

    fn handle_list_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_list_mode_key(key_event) {
            ListModeAction::EnterAddMode => self.state.view = View::Add,
            ListModeAction::MoveCursorUp => self.state.move_cursor_up(),
            ListModeAction::MoveCursorDown => self.state.move_cursor_down(),
            ListModeAction::DeleteItem => {
                if let Some(label) = self.state.delete_at_cursor() {
                    log::debug!("Deleted task '{}'", label);
                }
            }
            ListModeAction::ToggleSelected => self.state.toggle_selected(),
            ListModeAction::None => {}
        }
    }

    fn handle_add_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_add_mode_key(key_event) {
            AddModeAction::Confirm => self.confirm_add(),
            AddModeAction::Cancel => {
                self.input.reset();
                self.state.view = View::List;
            }
            AddModeAction::SwitchToList => self.state.view = View::List,
            AddModeAction::Backspace => self.input.backspace(),
            AddModeAction::Delete => self.input.delete(),
            AddModeAction::MoveCursorLeft => self.input.move_cursor_left(),
            AddModeAction::MoveCursorRight => self.input.move_cursor_right(),
            AddModeAction::MoveCursorHome => self.input.move_cursor_home(),
            AddModeAction::MoveCursorEnd => self.input.move_cursor_end(),
            AddModeAction::DeleteWordBackward => self.input.delete_word_backward(),
            AddModeAction::DeleteToStart => self.input.delete_to_start(),
            AddModeAction::DeleteToEnd => self.input.delete_to_end(),
            AddModeAction::InsertChar(c) => self.input.insert_char(c),
            AddModeAction::None => {}
        }
    }

    fn confirm_add(&mut self) {
        let label = self.input.take();
        log::debug!("Added task '{}'", label);
        self.state.push_item(label);
        self.state.view = View::List;
    }

    fn apply_empty_list_policy(&mut self) {
        if self.options.empty_list_opens_add && self.state.is_empty() {
            self.state.view = View::Add;
        }
    }

    pub fn total_items(&self) -> usize {
        self.state.items.len()
    }

    pub fn completed_items(&self) -> usize {
        self.state.completed_items()
    }

    #[cfg(test)]
    pub fn persister(&self) -> &Persister<S> {
        &self.persister
    }

    #[cfg(test)]
    pub fn persister_mut(&mut self) -> &mut Persister<S> {
        &mut self.persister
    }
}
