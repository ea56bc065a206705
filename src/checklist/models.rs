use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SEED_ITEMS: [&str; 2] = ["Do a thing", "do another thing"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    List,
    Add,
}

/// Everything about a checklist session that survives a restart.
///
/// `cursor` is only meaningful while `items` is non-empty; an empty list
/// keeps it at 0. `selected` holds positional indices of rows marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub items: Vec<String>,
    pub cursor: usize,
    pub selected: BTreeSet<usize>,
    #[serde(default)]
    pub view: View,
}

impl AppState {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            cursor: 0,
            selected: BTreeSet::new(),
            view: View::List,
        }
    }

    pub fn seeded() -> Self {
        Self::new(SEED_ITEMS.iter().map(|s| s.to_string()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn completed_items(&self) -> usize {
        self.selected.len()
    }

    pub fn move_cursor_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.items.len() - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn move_cursor_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = if self.cursor + 1 >= self.items.len() {
            0
        } else {
            self.cursor + 1
        };
    }

    pub fn toggle_selected(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if !self.selected.remove(&self.cursor) {
            self.selected.insert(self.cursor);
        }
    }

    /// Removes the row under the cursor and returns its label.
    ///
    /// Marks on later rows shift down with their rows so that every mark
    /// stays on the task it was set on.
    pub fn delete_at_cursor(&mut self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let removed_index = self.cursor;
        let removed = self.items.remove(removed_index);

        if self.cursor == self.items.len() {
            self.cursor = self.cursor.saturating_sub(1);
        }

        self.selected = self
            .selected
            .iter()
            .filter(|&&i| i != removed_index)
            .map(|&i| if i > removed_index { i - 1 } else { i })
            .collect();

        Some(removed)
    }

    /// Appends a task and points the cursor at it.
    pub fn push_item(&mut self, label: String) {
        self.items.push(label);
        self.cursor = self.items.len() - 1;
    }

    /// Brings a restored state back inside its invariants. Returns true if
    /// anything had to change.
    pub fn normalize(&mut self) -> bool {
        let len = self.items.len();
        let mut repaired = false;

        let cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
        if cursor != self.cursor {
            self.cursor = cursor;
            repaired = true;
        }

        let before = self.selected.len();
        self.selected.retain(|&i| i < len);
        if self.selected.len() != before {
            repaired = true;
        }

        repaired
    }

    #[cfg(test)]
    pub fn invariants_hold(&self) -> bool {
        let cursor_ok = self.items.is_empty() || self.cursor < self.items.len();
        let selected_ok = self.selected.iter().all(|&i| i < self.items.len());
        cursor_ok && selected_ok
    }
}

/// Any state that satisfies the invariants: in-range cursor and marks,
/// either view.
#[cfg(test)]
pub(crate) fn arb_app_state() -> impl proptest::strategy::Strategy<Value = AppState> {
    use proptest::prelude::*;

    (prop::collection::vec("\\PC{0,24}", 0..8), any::<bool>())
        .prop_flat_map(|(items, add_view)| {
            let len = items.len();
            let cursor = if len == 0 { Just(0).boxed() } else { (0..len).boxed() };
            let marks = prop::collection::vec(any::<bool>(), len);
            (Just(items), cursor, marks, Just(add_view))
        })
        .prop_map(|(items, cursor, marks, add_view)| AppState {
            items,
            cursor,
            selected: marks
                .iter()
                .enumerate()
                .filter(|(_, done)| **done)
                .map(|(i, _)| i)
                .collect(),
            view: if add_view { View::Add } else { View::List },
        })
}
