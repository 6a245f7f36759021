//! portal-tui - A terminal UI for a marketing portal dataset
//!
//! This is the main entry point for the portal-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod format;
mod grid;
mod model;
mod pages;
mod services;
mod tui;

use crate::action::Action;
use crate::app::{App, PendingEdit};
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::{anyhow, Context, Result};
use crossterm::event::Event;
use simplelog::WriteLogger;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

const DEFAULT_DATASET: &str = "portal.json";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    init_logging(&config);

    // portal-tui [DATASET_PATH]
    if let Some(path) = std::env::args().nth(1) {
        config.data_path = path;
        if let Err(e) = config.save() {
            log::warn!("Could not remember dataset path: {:#}", e);
        }
    }
    let data_path = if config.data_path.is_empty() {
        PathBuf::from(DEFAULT_DATASET)
    } else {
        PathBuf::from(&config.data_path)
    };

    // Setup terminal
    Tui::install_panic_hook();
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(config, data_path);

    // Main event loop
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    // Cleanup terminal before any error is printed
    let restore = tui.exit();
    primary_error(result, restore)
}

/// The event loop's error wins over a failed terminal restore
fn primary_error(result: Result<()>, restore: Result<()>) -> Result<()> {
    if let Err(e) = &restore {
        log::error!("Failed to restore terminal: {:#}", e);
    }
    result.and(restore)
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(config: &Config) {
    let Some(log_path) = Config::log_path() else {
        return;
    };
    if let Some(dir) = log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(log_file) = File::create(&log_path) {
        let _ = WriteLogger::init(
            config.log_level_filter(),
            simplelog::Config::default(),
            log_file,
        );
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                log::error!("Draw error: {:#}", e);
            }
        })?;

        // Check for a record waiting for the external editor
        if let Some(edit) = app.pending_edit.take() {
            let result = launch_external_editor(tui, &edit);
            app.finish_edit(edit, result);
            continue; // Redraw after editor closes
        }

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                log::debug!("{}", a);
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

/// Open the edit buffer in $VISUAL, $EDITOR or vim
fn launch_external_editor(tui: &mut Tui, edit: &PendingEdit) -> Result<()> {
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vim".to_string());

    tui.suspend()?;
    let status = Command::new(&editor).arg(&edit.path).status();
    tui.resume()?;

    let status = status.with_context(|| format!("Failed to launch editor '{}'", editor))?;
    if !status.success() {
        return Err(anyhow!("Editor exited with status: {}", status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_error_wins_over_restore_error() {
        let result = primary_error(Err(anyhow!("dataset vanished")), Err(anyhow!("tty gone")));
        assert_eq!(result.unwrap_err().to_string(), "dataset vanished");
    }

    #[test]
    fn test_restore_error_reported_after_clean_loop() {
        let result = primary_error(Ok(()), Err(anyhow!("tty gone")));
        assert_eq!(result.unwrap_err().to_string(), "tty gone");
        assert!(primary_error(Ok(()), Ok(())).is_ok());
    }
}
