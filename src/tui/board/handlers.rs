// File: src/tui/board/handlers.rs
// Handles keyboard input for the board TUI.
use crate::model::PlanItem;
use crate::tui::board::state::{BoardState, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Returns true when the application should quit.
pub fn handle_key_event(key: KeyEvent, state: &mut BoardState) -> bool {
    match state.mode {
        InputMode::Normal => handle_normal_key(key, state),
        InputMode::Creating | InputMode::CreatingChild => {
            handle_creating_key(key, state);
            false
        }
        InputMode::EditingTitle | InputMode::EditingNotes => {
            handle_editing_key(key, state);
            false
        }
        InputMode::ConfirmDelete => {
            handle_confirm_delete_key(key, state);
            false
        }
    }
}

fn handle_normal_key(key: KeyEvent, state: &mut BoardState) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => state.show_help = !state.show_help,

        KeyCode::Char('j') | KeyCode::Down => state.next(),
        KeyCode::Char('k') | KeyCode::Up => state.previous(),

        KeyCode::Char(' ') => {
            if let Some(id) = state.selected_id() {
                if state.store.children(&id).is_empty() {
                    state.message = "Nothing to collapse here.".to_string();
                } else if !state.collapsed.remove(&id) {
                    state.collapsed.insert(id);
                }
                state.clamp_selection();
            }
        }

        KeyCode::Char('s') => {
            if let Some(id) = state.selected_id() {
                match state.store.cycle_status(&id) {
                    Ok(Some(item)) => {
                        state.message = format!("{} -> {}", item.title, item.status.label());
                    }
                    Ok(None) => {}
                    Err(e) => state.message = format!("Error: {}", e),
                }
            }
        }

        KeyCode::Char('a') => {
            state.mode = InputMode::Creating;
            state.input_buffer.clear();
        }
        KeyCode::Char('A') => {
            if state.selected_id().is_some() {
                state.mode = InputMode::CreatingChild;
                state.input_buffer.clear();
            } else {
                state.message = "Select a parent first.".to_string();
            }
        }

        KeyCode::Char('e') => {
            if let Some(item) = state.selected_item() {
                state.input_buffer = item.title.clone();
                state.mode = InputMode::EditingTitle;
            }
        }
        KeyCode::Char('E') => {
            if let Some(item) = state.selected_item() {
                state.input_buffer = item.notes.clone();
                state.mode = InputMode::EditingNotes;
            }
        }

        KeyCode::Char('d') => {
            if state.selected_id().is_some() {
                state.mode = InputMode::ConfirmDelete;
            }
        }
        _ => {}
    }
    false
}

fn handle_creating_key(key: KeyEvent, state: &mut BoardState) {
    match key.code {
        KeyCode::Esc => {
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Tab => state.cycle_new_kind(),
        KeyCode::Enter => {
            let title = state.input_buffer.trim().to_string();
            if title.is_empty() {
                state.message = "Title cannot be empty.".to_string();
                return;
            }
            let parent_id = if state.mode == InputMode::CreatingChild {
                state.selected_id()
            } else {
                None
            };
            let item = PlanItem::new(state.new_kind, &title, parent_id);
            match state.store.add(item) {
                Ok(()) => state.message = format!("Added '{}'.", title),
                Err(e) => state.message = format!("Error: {}", e),
            }
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
            state.clamp_selection();
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Char(c) => state.input_buffer.push(c),
        _ => {}
    }
}

fn handle_editing_key(key: KeyEvent, state: &mut BoardState) {
    match key.code {
        KeyCode::Esc => {
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            if let Some(mut item) = state.selected_item().cloned() {
                if state.mode == InputMode::EditingTitle {
                    let title = state.input_buffer.trim().to_string();
                    if title.is_empty() {
                        state.message = "Title cannot be empty.".to_string();
                        return;
                    }
                    item.title = title;
                } else {
                    item.notes = state.input_buffer.trim().to_string();
                }
                match state.store.update(item) {
                    Ok(()) => state.message = "Saved.".to_string(),
                    Err(e) => state.message = format!("Error: {}", e),
                }
            }
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Char(c) => state.input_buffer.push(c),
        _ => {}
    }
}

fn handle_confirm_delete_key(key: KeyEvent, state: &mut BoardState) {
    if key.code == KeyCode::Char('y')
        && let Some(id) = state.selected_id()
    {
        match state.store.remove(&id) {
            // Children are re-parented, not deleted with it.
            Ok(Some(item)) => state.message = format!("Deleted '{}'.", item.title),
            Ok(None) => {}
            Err(e) => state.message = format!("Error: {}", e),
        }
        state.clamp_selection();
    }
    state.mode = InputMode::Normal;
}
