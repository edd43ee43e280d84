use appraiser::{Field, Neighborhood, Report, Summary};

/// Lifecycle of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Controls adjustable; no estimate, or a stale one from before the last change.
    Idle,
    /// The shown estimate matches the current controls.
    Estimated,
}

/// Which control receives adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Slider(Field),
    Neighborhood,
}

impl Focus {
    pub const ORDER: [Focus; 6] = [
        Focus::Slider(Field::LivingArea),
        Focus::Slider(Field::OverallQuality),
        Focus::Slider(Field::YearBuilt),
        Focus::Slider(Field::BasementArea),
        Focus::Slider(Field::GarageCapacity),
        Focus::Neighborhood,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

/// A slider as drawn.
#[derive(Debug, Clone)]
pub struct SliderView {
    pub label: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
    pub ratio: f64,
    pub focused: bool,
}

/// Full snapshot rendered by the form screen.
#[derive(Debug, Clone)]
pub struct FormView {
    pub phase: Phase,
    pub sliders: Vec<SliderView>,
    pub neighborhood: Neighborhood,
    pub neighborhood_focused: bool,
    pub summary: Summary,
    pub report: Option<Report>,
}

impl FormView {
    /// True when an estimate is shown but the controls moved since.
    pub fn is_stale(&self) -> bool {
        self.phase == Phase::Idle && self.report.is_some()
    }
}
