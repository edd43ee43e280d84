use appraiser::{
    presenter::{DATA_SOURCE_NOTICE, TITLE},
    Advisory, Neighborhood,
};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::state::model::{FormView, SliderView};
use crate::ui::theme::Theme;

pub fn header<'a>() -> Paragraph<'a> {
    let mut lines = vec![Line::from(Span::styled(TITLE, Theme::title()))];
    lines.extend(
        DATA_SOURCE_NOTICE
            .iter()
            .map(|l| Line::from(Span::styled(*l, Theme::dim()))),
    );

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .wrap(Wrap { trim: true })
}

fn control_block<'a>(title: String, focused: bool) -> Block<'a> {
    let (border, marker) = if focused {
        (Theme::border_focused(), "▶ ")
    } else {
        (Theme::border(), "")
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {marker}{title} "))
        .title_style(Theme::title())
}

pub fn slider<'a>(s: &SliderView) -> Gauge<'a> {
    Gauge::default()
        .block(control_block(
            format!("{} [{}..{}]", s.label, s.min, s.max),
            s.focused,
        ))
        .gauge_style(Theme::gauge())
        .ratio(s.ratio.clamp(0.0, 1.0))
        .label(s.value.to_string())
}

pub fn selector<'a>(selected: Neighborhood, focused: bool) -> Paragraph<'a> {
    let position = format!("  {}/{}", selected.index() + 1, Neighborhood::ALL.len());

    Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Theme::muted()),
        Span::styled(selected.code(), Theme::text()),
        Span::styled(" ▶", Theme::muted()),
        Span::styled(position, Theme::muted()),
    ]))
    .block(control_block("Neighborhood".to_string(), focused))
}

pub fn metric<'a>(label: &'a str, value: &str) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(label, Theme::dim())),
        Line::from(Span::styled(value.to_string(), Theme::title())),
    ])
    .alignment(Alignment::Center)
}

pub fn summary_block<'a>() -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Property Summary ")
        .title_style(Theme::title())
}

pub fn estimate<'a>(view: &FormView) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Estimate ")
        .title_style(Theme::title());

    let Some(report) = &view.report else {
        return Paragraph::new(Line::from(Span::styled(
            "Press enter to estimate the price.",
            Theme::muted(),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
    };

    let mut lines = vec![
        Line::from(Span::styled(report.headline(), Theme::money())),
        Line::from(Span::styled(report.caption(), Theme::dim())),
        Line::from(""),
    ];

    if !report.estimate.is_plausible() {
        lines.push(Line::from(Span::styled(
            format!(
                "Warning: model output {:.4} (log scale) gives an implausible price.",
                report.estimate.log_price
            ),
            Theme::error(),
        )));
    }

    match report.advisory {
        Some(Advisory::Premium) => lines.push(Line::from(Span::styled(
            Advisory::Premium.message(),
            Theme::premium(),
        ))),
        Some(Advisory::FixerUpper) => lines.push(Line::from(Span::styled(
            Advisory::FixerUpper.message(),
            Theme::caution(),
        ))),
        None => {}
    }

    if view.is_stale() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Controls changed since this estimate; press enter to refresh.",
            Theme::muted(),
        )));
    }

    Paragraph::new(lines).block(block).wrap(Wrap { trim: true })
}

pub fn hints<'a>(hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Theme::key()),
                Span::styled(format!(" {action}    "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
