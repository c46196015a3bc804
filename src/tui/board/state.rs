// File: ./src/tui/board/state.rs
// Manages the application state for the board TUI.
use crate::context::SharedContext;
use crate::model::{ItemKind, PlanItem};
use crate::store::PlannerStore;
use ratatui::widgets::ListState;
use std::collections::HashSet;
use strum::IntoEnumIterator;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Typing the title of a new root-level item.
    Creating,
    /// Typing the title of a new child of the selection.
    CreatingChild,
    EditingTitle,
    EditingNotes,
    ConfirmDelete,
}

pub struct BoardState {
    pub ctx: SharedContext,
    pub store: PlannerStore,

    // UI state
    pub collapsed: HashSet<String>,
    pub list_state: ListState,
    pub mode: InputMode,
    pub input_buffer: String,
    pub new_kind: ItemKind,
    pub message: String,
    pub show_help: bool,
}

impl BoardState {
    pub fn new(ctx: SharedContext, store: PlannerStore) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            ctx,
            store,
            collapsed: HashSet::new(),
            list_state,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            new_kind: ItemKind::Video,
            message: "Ready.".to_string(),
            show_help: false,
        }
    }

    /// Ids of the rows currently visible, in display order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.store
            .tree(&self.collapsed)
            .iter()
            .map(|(_, item)| item.id.clone())
            .collect()
    }

    pub fn selected_id(&self) -> Option<String> {
        let ids = self.visible_ids();
        ids.get(self.list_state.selected()?).cloned()
    }

    pub fn selected_item(&self) -> Option<&PlanItem> {
        let id = self.selected_id()?;
        self.store.get(&id)
    }

    pub fn next(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_ids().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn cycle_new_kind(&mut self) {
        let kinds: Vec<ItemKind> = ItemKind::iter().collect();
        let pos = kinds.iter().position(|k| *k == self.new_kind).unwrap_or(0);
        self.new_kind = kinds[(pos + 1) % kinds.len()];
    }
}
