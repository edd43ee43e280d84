use appraiser::{
    config::{DEFAULTS_FILE, MODEL_FILE},
    presenter::{MISSING_ASSETS_MESSAGE, TITLE},
};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::{layout::centered_rect, theme::Theme, widgets};

use super::Action;

/// Nothing can be done without assets; any key ends the session.
pub fn handle_key(_key: KeyCode) -> Action {
    Action::Quit
}

pub fn draw(f: &mut Frame) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(70, 60, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Min(6),    // message box
            Constraint::Length(1), // hint
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled(TITLE, Theme::title())),
        chunks[0],
    );

    let lines = vec![
        Line::from(Span::styled(MISSING_ASSETS_MESSAGE, Theme::error())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Expected {MODEL_FILE} and {DEFAULTS_FILE}, e.g. from:"),
            Theme::dim(),
        )),
        Line::from(Span::styled("  appraiser train.csv", Theme::key())),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::error())
                    .title(" Error ")
                    .title_style(Theme::error()),
            )
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    f.render_widget(widgets::hints(&[("any key", "quit")]), chunks[2]);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::ui::screens::Screen;

    #[test]
    fn shows_instructions_and_no_controls() {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| Screen::MissingAssets.draw(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("Model files not found"));
        assert!(!text.contains("Living Area"));
        assert!(!text.contains("Estimate"));
    }

    #[test]
    fn any_key_quits() {
        let mut screen = Screen::MissingAssets;
        assert!(matches!(screen.handle_key(KeyCode::Enter), Ok(Action::Quit)));
        assert!(matches!(screen.handle_key(KeyCode::Char('x')), Ok(Action::Quit)));
    }
}
