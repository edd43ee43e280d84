pub mod form;
pub mod missing;

use crossterm::event::KeyCode;
use ratatui::Frame;

pub enum Action {
    None,
    Quit,
}

pub enum Screen {
    Form(form::FormState),
    MissingAssets,
}

impl Screen {
    pub fn draw(&self, f: &mut Frame) {
        match self {
            Screen::Form(s) => form::draw(f, s),
            Screen::MissingAssets => missing::draw(f),
        }
    }

    /// Routes a key press to the active screen.
    ///
    /// # Errors
    /// Returns an error if the model fails on an estimate request.
    pub fn handle_key(&mut self, key: KeyCode) -> appraiser::Result<Action> {
        match self {
            Screen::Form(s) => form::handle_key(s, key),
            Screen::MissingAssets => Ok(missing::handle_key(key)),
        }
    }
}
