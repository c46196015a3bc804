// File: ./src/tui/scout/mod.rs
// Entry point and main loop for the scout TUI.
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::context::SharedContext;
use crate::tui::action::Action;
use crate::tui::scout::state::ScoutState;
use crate::tui::scout::view::draw;
use crate::tui::{install_panic_hook, network, restore_terminal, setup_terminal};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc;

pub async fn run(ctx: SharedContext) -> Result<()> {
    install_panic_hook(ctx.get_log_path("scout"));

    // --- 1. CONFIG / ONBOARDING ---
    let cfg = match Config::load(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            // A syntax or permission error is reported, not silently
            // replaced by onboarding defaults.
            if !Config::is_missing_config_error(&e) {
                eprintln!("Error loading configuration:\n{}", e);
                std::process::exit(1);
            }

            println!("Welcome to scoutdesk. No configuration file found.");
            println!("The scout needs the URL of your listing backend.\n");

            print!("Backend URL (e.g. http://localhost:3000): ");
            io::stdout().flush()?;
            let mut url = String::new();
            io::stdin().read_line(&mut url)?;

            let mut new_config = Config::default();
            new_config.backend_url = url.trim().trim_end_matches('/').to_string();

            if let Err(e) = new_config.save(ctx.as_ref()) {
                eprintln!("Warning: Could not save config file: {}", e);
            } else if let Ok(path) = Config::get_path_string(ctx.as_ref()) {
                println!("Configuration saved to: {}", path);
            }
            new_config
        }
    };

    // --- 2. TERMINAL SETUP ---
    let mut terminal = setup_terminal()?;

    // --- 3. STATE INIT ---
    let mut app_state = ScoutState::new(ctx.clone(), &cfg);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- 4. NETWORK ACTOR ---
    tokio::spawn(network::run_network_actor(cfg, action_rx, event_tx));

    // --- 5. UI LOOP ---
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        // A. Network events
        if let Ok(event) = event_rx.try_recv() {
            handlers::handle_app_event(&mut app_state, event);
        }

        // B. Input events
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
                    if let Some(action) = handlers::handle_key_event(key, &mut app_state) {
                        let quitting = matches!(action, Action::Quit);
                        let _ = action_tx.send(action).await;
                        if quitting {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    // --- 6. CLEANUP ---
    restore_terminal(&mut terminal)?;
    Ok(())
}
