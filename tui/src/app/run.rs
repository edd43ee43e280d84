use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use appraiser::{load_assets, AssetPaths};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::screens::{form::FormState, Action, Screen};

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Picks the first screen: the form, or the fatal notice when assets are absent.
///
/// # Errors
/// Returns an error if the assets exist but cannot be loaded.
fn initial_screen(paths: &AssetPaths) -> Result<Screen> {
    let loaded = load_assets(paths).with_context(|| {
        format!(
            "loading {} and {}",
            paths.model.display(),
            paths.defaults.display()
        )
    })?;

    Ok(match loaded {
        Some(assets) => Screen::Form(FormState::new(Arc::new(assets))),
        None => Screen::MissingAssets,
    })
}

/// Runs the appraisal form until the user quits.
///
/// # Errors
/// Returns an error if the assets are corrupt, the model rejects a request, or
/// terminal setup or rendering fails.
pub fn run() -> Result<()> {
    let paths = AssetPaths::from_env();
    let mut screen = initial_screen(&paths)?;

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| screen.draw(f))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match screen.handle_key(k.code)? {
                    Action::Quit => break,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
