use std::sync::Arc;

use appraiser::Assets;
use crossterm::event::KeyCode;
use ratatui::{widgets::Block, Frame};

use crate::state::session::{Adjust, FormSession};
use crate::ui::{layout, theme::Theme, widgets};

use super::Action;

const HINTS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("←→", "adjust"),
    ("pgup/pgdn", "big step"),
    ("home/end", "min/max"),
    ("enter", "estimate price"),
    ("q", "quit"),
];

pub struct FormState {
    pub session: FormSession,
}

impl FormState {
    pub fn new(assets: Arc<Assets>) -> Self {
        Self {
            session: FormSession::new(assets),
        }
    }
}

pub fn handle_key(state: &mut FormState, key: KeyCode) -> appraiser::Result<Action> {
    let session = &mut state.session;

    match key {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => session.focus_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => session.focus_next(),
        KeyCode::Left | KeyCode::Char('h') => session.adjust(Adjust::Step(-1)),
        KeyCode::Right | KeyCode::Char('l') => session.adjust(Adjust::Step(1)),
        KeyCode::PageDown => session.adjust(Adjust::Coarse(-1)),
        KeyCode::PageUp => session.adjust(Adjust::Coarse(1)),
        KeyCode::Home => session.adjust(Adjust::Min),
        KeyCode::End => session.adjust(Adjust::Max),
        KeyCode::Enter | KeyCode::Char('e') => session.estimate()?,
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),
        _ => {}
    }

    Ok(Action::None)
}

pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let view = state.session.view();
    let (header_area, body_area, hints_area) = layout::vertical(area);
    let (controls_area, results_area) = layout::body(body_area);
    let (summary_area, estimate_area) = layout::results(results_area);

    f.render_widget(widgets::header(), header_area);

    let rows = layout::controls(controls_area, view.sliders.len());
    for (slider, row) in view.sliders.iter().zip(rows.iter()) {
        f.render_widget(widgets::slider(slider), *row);
    }
    if let Some(row) = rows.last() {
        f.render_widget(
            widgets::selector(view.neighborhood, view.neighborhood_focused),
            *row,
        );
    }

    let summary_block = widgets::summary_block();
    let metrics_area = summary_block.inner(summary_area);
    f.render_widget(summary_block, summary_area);

    let [size, quality, location] = layout::metrics(metrics_area);
    f.render_widget(widgets::metric("Size", &view.summary.size), size);
    f.render_widget(widgets::metric("Quality", &view.summary.quality), quality);
    f.render_widget(widgets::metric("Location", &view.summary.location), location);

    f.render_widget(widgets::estimate(&view), estimate_area);
    f.render_widget(widgets::hints(HINTS), hints_area);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::state::session::tests::sample_assets;
    use crate::ui::screens::Screen;

    fn render(screen: &Screen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| screen.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press(screen: &mut Screen, key: KeyCode) -> Action {
        screen.handle_key(key).unwrap()
    }

    #[test]
    fn idle_form_shows_controls_and_summary() {
        let screen = Screen::Form(FormState::new(sample_assets()));
        let text = render(&screen);

        assert!(text.contains("AI Real Estate Appraiser"));
        assert!(text.contains("Living Area (sq ft)"));
        assert!(text.contains("Neighborhood"));
        assert!(text.contains("Property Summary"));
        assert!(text.contains("1500 sqft"));
        assert!(text.contains("Press enter to estimate the price."));
        assert!(!text.contains("Estimated Value"));
    }

    #[test]
    fn enter_shows_estimate_and_advisory() {
        let mut screen = Screen::Form(FormState::new(sample_assets()));
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::End);
        press(&mut screen, KeyCode::Enter);

        let text = render(&screen);
        assert!(text.contains("10/10"));
        assert!(text.contains("Estimated Value: $"));
        assert!(text.contains("Premium Property"));
    }

    #[test]
    fn adjusting_after_estimate_marks_it_stale() {
        let mut screen = Screen::Form(FormState::new(sample_assets()));
        press(&mut screen, KeyCode::Enter);
        assert!(!render(&screen).contains("Controls changed"));

        press(&mut screen, KeyCode::Right);
        let text = render(&screen);
        assert!(text.contains("Estimated Value: $162,753.79"));
        assert!(text.contains("Controls changed"));
    }

    #[test]
    fn quit_keys() {
        let mut screen = Screen::Form(FormState::new(sample_assets()));
        assert!(matches!(press(&mut screen, KeyCode::Char('q')), Action::Quit));
        assert!(matches!(press(&mut screen, KeyCode::Esc), Action::Quit));
        assert!(matches!(press(&mut screen, KeyCode::Char('x')), Action::None));
    }
}
