// File: ./src/tui/board/mod.rs
// Entry point and main loop for the board TUI.
pub mod handlers;
pub mod state;
pub mod view;

use crate::context::SharedContext;
use crate::store::PlannerStore;
use crate::tui::board::state::BoardState;
use crate::tui::board::view::draw;
use crate::tui::{install_panic_hook, restore_terminal, setup_terminal};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use std::time::Duration;

pub fn run(ctx: SharedContext) -> Result<()> {
    install_panic_hook(ctx.get_log_path("board"));

    // A failing load must stop the session: saves are blocked anyway, and
    // starting with an empty board would look like data loss.
    let store = match PlannerStore::open(ctx.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Could not load the planning board:\n{}", e);
            if let Some(path) = ctx.get_planner_path() {
                eprintln!(
                    "\nInspect or move '{}' and try again. Nothing was overwritten.",
                    path.display()
                );
            }
            std::process::exit(1);
        }
    };

    let mut terminal = setup_terminal()?;
    let mut app_state = BoardState::new(ctx, store);

    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if handlers::handle_key_event(key, &mut app_state) {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
