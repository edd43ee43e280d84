use ratatui::style::{Color, Modifier, Style};

/// Appraisal form palette.
///
/// Warm foreground on a dark background, with green for good news and amber
/// for cautions.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(12, 14, 20);
    pub const FG: Color = Color::Rgb(230, 230, 220);
    pub const FG_DIM: Color = Color::Rgb(160, 165, 170);
    pub const FG_MUTED: Color = Color::Rgb(90, 95, 105);

    pub const ACCENT: Color = Color::Rgb(90, 180, 255);
    pub const MONEY: Color = Color::Rgb(80, 220, 120);
    pub const AMBER: Color = Color::Rgb(255, 190, 60);
    pub const RED: Color = Color::Rgb(255, 80, 80);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Border of the control that has focus.
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn key() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Self::ACCENT).bg(Color::Rgb(30, 34, 44))
    }

    pub fn money() -> Style {
        Style::default().fg(Self::MONEY).add_modifier(Modifier::BOLD)
    }

    pub fn premium() -> Style {
        Style::default().fg(Self::MONEY)
    }

    pub fn caution() -> Style {
        Style::default().fg(Self::AMBER).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }
}
