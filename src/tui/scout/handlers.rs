// File: src/tui/scout/handlers.rs
// Handles keyboard input and network events for the scout TUI.
use crate::pipeline::normalize_all;
use crate::tui::action::{Action, AppEvent};
use crate::tui::scout::state::{InputMode, RequestShape, ScoutState};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_app_event(state: &mut ScoutState, event: AppEvent) {
    match event {
        AppEvent::Status(s) => state.message = s,
        AppEvent::Error(s) => {
            // No partial results: a failed exchange empties the table.
            state.error = Some(s);
            state.listings.clear();
            state.loading = false;
            state.clamp_selection();
        }
        AppEvent::ListingsLoaded(raw) => {
            let total = raw.len();
            state.listings = normalize_all(raw);
            state.error = None;
            state.loading = false;
            state.message = format!(
                "{} listings fetched, {} visible.",
                total,
                state.visible_len()
            );
            state.table_state.select(Some(0));
            state.clamp_selection();
        }
    }
}

/// Returns an action for the network actor when a key triggers one.
pub fn handle_key_event(key: KeyEvent, state: &mut ScoutState) -> Option<Action> {
    match state.mode {
        InputMode::Normal => handle_normal_key(key, state),
        InputMode::EditingField => {
            handle_field_key(key, state);
            None
        }
        InputMode::EditingThreshold => {
            handle_threshold_key(key, state);
            None
        }
    }
}

fn handle_normal_key(key: KeyEvent, state: &mut ScoutState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => state.show_help = !state.show_help,

        KeyCode::Char('j') | KeyCode::Down => state.next(),
        KeyCode::Char('k') | KeyCode::Up => state.previous(),
        KeyCode::Char('g') | KeyCode::Home => {
            if state.visible_len() > 0 {
                state.table_state.select(Some(0));
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            let len = state.visible_len();
            if len > 0 {
                state.table_state.select(Some(len - 1));
            }
        }

        // Pipeline controls. The view recomputes, so only the selection
        // needs fixing up here.
        KeyCode::Char('a') => {
            state.opts.require_area = !state.opts.require_area;
            state.clamp_selection();
        }
        KeyCode::Char('o') => {
            state.cycle_sort();
            state.clamp_selection();
        }
        KeyCode::Char('t') => {
            state.mode = InputMode::EditingThreshold;
            state.input_buffer = format!("{}", state.opts.min_undervalue_pct);
        }

        // Request form
        KeyCode::Tab => {
            state.shape = match state.shape {
                RequestShape::Urls => RequestShape::Search,
                RequestShape::Search => RequestShape::Urls,
            };
            state.active_field = 0;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            state.mode = InputMode::EditingField;
        }

        // The fetch trigger stays disabled while a request is in flight.
        KeyCode::Char('f') => {
            if state.loading {
                state.message = "A request is already running.".to_string();
                return None;
            }
            let action = match state.shape {
                RequestShape::Urls => {
                    let request = state.url_request();
                    if request.is_empty() {
                        state.message = "Enter at least one portal URL first (e).".to_string();
                        return None;
                    }
                    Action::FetchUrls(request)
                }
                RequestShape::Search => Action::Search(state.search_params()),
            };
            state.loading = true;
            state.error = None;
            return Some(action);
        }
        _ => {}
    }
    None
}

fn handle_field_key(key: KeyEvent, state: &mut ScoutState) {
    let field = state.active_field;
    match key.code {
        KeyCode::Esc | KeyCode::Enter => state.mode = InputMode::Normal,
        KeyCode::Tab | KeyCode::Down => {
            state.active_field = (field + 1) % state.field_count();
        }
        KeyCode::BackTab | KeyCode::Up => {
            let count = state.field_count();
            state.active_field = (field + count - 1) % count;
        }
        KeyCode::Backspace => {
            state.field_value_mut(field).pop();
        }
        KeyCode::Char(c) => {
            state.field_value_mut(field).push(c);
        }
        _ => {}
    }
}

fn handle_threshold_key(key: KeyEvent, state: &mut ScoutState) {
    match key.code {
        KeyCode::Esc => state.mode = InputMode::Normal,
        KeyCode::Enter => {
            match state.input_buffer.trim().parse::<f64>() {
                // Non-finite parses ("inf", "NaN") are coerced by the
                // pipeline's threshold(); unparseable text keeps the old
                // value.
                Ok(v) => {
                    state.opts.min_undervalue_pct = v;
                    state.clamp_selection();
                }
                Err(_) if state.input_buffer.trim().is_empty() => {
                    state.opts.min_undervalue_pct = 0.0;
                    state.clamp_selection();
                }
                Err(_) => {
                    state.message = format!("Not a number: '{}'", state.input_buffer.trim());
                }
            }
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
            state.input_buffer.push(c);
        }
        _ => {}
    }
}
