use std::sync::Arc;

use appraiser::{assemble, estimate, Assets, Controls, Neighborhood, Report, Result, Summary};

use super::model::{Focus, FormView, Phase, SliderView};

/// How a key moves the focused control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    /// One unit, signed.
    Step(i64),
    /// One coarse step, signed.
    Coarse(i64),
    Min,
    Max,
}

/// One user's form: current selections plus the last estimate.
///
/// The assets are shared read-only; everything else belongs to this session.
pub struct FormSession {
    assets: Arc<Assets>,
    controls: Controls,
    focus: Focus,
    phase: Phase,
    report: Option<Report>,
}

impl FormSession {
    /// Starts an idle session with controls seeded from the defaults.
    pub fn new(assets: Arc<Assets>) -> Self {
        let controls = Controls::from_defaults(&assets.defaults);
        Self {
            assets,
            controls,
            focus: Focus::ORDER[0],
            phase: Phase::Idle,
            report: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Applies `adjust` to the focused control. Any actual change makes a shown
    /// estimate stale.
    pub fn adjust(&mut self, adjust: Adjust) {
        let changed = match self.focus {
            Focus::Slider(field) => {
                let slider = self.controls.slider_mut(field);
                match adjust {
                    Adjust::Step(n) => slider.shift(n),
                    Adjust::Coarse(n) => slider.shift(n.saturating_mul(field.coarse_step())),
                    Adjust::Min => slider.set(slider.min()),
                    Adjust::Max => slider.set(slider.max()),
                }
            }
            Focus::Neighborhood => {
                let current = self.controls.neighborhood();
                let next = match adjust {
                    Adjust::Step(n) | Adjust::Coarse(n) if n < 0 => current.prev(),
                    Adjust::Step(_) | Adjust::Coarse(_) => current.next(),
                    Adjust::Min => Neighborhood::ALL[0],
                    Adjust::Max => Neighborhood::ALL[Neighborhood::ALL.len() - 1],
                };
                self.controls.set_neighborhood(next)
            }
        };

        if changed {
            self.phase = Phase::Idle;
        }
    }

    /// Prices the current selections.
    ///
    /// # Errors
    /// Propagates a model failure; the session is left unchanged.
    pub fn estimate(&mut self) -> Result<()> {
        let inputs = self.controls.inputs();
        let row = assemble(&self.assets.defaults, &inputs);
        let estimate = estimate(&self.assets.model, &row)?;

        log::info!(
            "estimate for {} sqft, quality {}, {}: ${:.2}",
            inputs.gr_liv_area,
            inputs.overall_qual,
            inputs.neighborhood,
            estimate.price_usd
        );

        self.report = Some(Report::new(estimate, inputs.overall_qual));
        self.phase = Phase::Estimated;
        Ok(())
    }

    /// Returns the current snapshot for rendering.
    pub fn view(&self) -> FormView {
        let sliders = self
            .controls
            .sliders()
            .iter()
            .map(|s| SliderView {
                label: s.field().label(),
                value: s.value(),
                min: s.min(),
                max: s.max(),
                ratio: s.ratio(),
                focused: self.focus == Focus::Slider(s.field()),
            })
            .collect();

        FormView {
            phase: self.phase,
            sliders,
            neighborhood: self.controls.neighborhood(),
            neighborhood_focused: self.focus == Focus::Neighborhood,
            summary: Summary::of(&self.controls.inputs()),
            report: self.report.clone(),
        }
    }
}
