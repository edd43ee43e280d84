use crate::{
    features::{
        DefaultFeatures, GARAGE_CARS, GR_LIV_AREA, OVERALL_QUAL, PropertyInputs, TOTAL_BSMT_SF,
        YEAR_BUILT,
    },
    neighborhood::Neighborhood,
};

/// The bounded numeric fields on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LivingArea,
    OverallQuality,
    YearBuilt,
    BasementArea,
    GarageCapacity,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Self::LivingArea,
        Self::OverallQuality,
        Self::YearBuilt,
        Self::BasementArea,
        Self::GarageCapacity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::LivingArea => GR_LIV_AREA,
            Self::OverallQuality => OVERALL_QUAL,
            Self::YearBuilt => YEAR_BUILT,
            Self::BasementArea => TOTAL_BSMT_SF,
            Self::GarageCapacity => GARAGE_CARS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LivingArea => "Living Area (sq ft)",
            Self::OverallQuality => "Overall Quality (1-10)",
            Self::YearBuilt => "Year Built",
            Self::BasementArea => "Basement Size (sq ft)",
            Self::GarageCapacity => "Garage Capacity",
        }
    }

    /// Inclusive `(min, max)`.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::LivingArea => (500, 5000),
            Self::OverallQuality => (1, 10),
            Self::YearBuilt => (1900, 2024),
            Self::BasementArea => (0, 3000),
            Self::GarageCapacity => (0, 4),
        }
    }

    /// Step used by page up / page down.
    pub fn coarse_step(self) -> i64 {
        match self {
            Self::LivingArea | Self::BasementArea => 100,
            Self::YearBuilt => 10,
            Self::OverallQuality | Self::GarageCapacity => 1,
        }
    }
}

/// A bounded integer control. The value never leaves `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    field: Field,
    value: i64,
}

impl Slider {
    /// Creates a slider for `field`, clamping `value` into its bounds.
    pub fn new(field: Field, value: i64) -> Self {
        let (min, max) = field.bounds();
        Self {
            field,
            value: value.clamp(min, max),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn min(&self) -> i64 {
        self.field.bounds().0
    }

    pub fn max(&self) -> i64 {
        self.field.bounds().1
    }

    /// Moves the value by `delta`, saturating at the bounds.
    ///
    /// # Returns
    /// Whether the value changed.
    pub fn shift(&mut self, delta: i64) -> bool {
        self.set(self.value.saturating_add(delta))
    }

    /// Sets the value, saturating at the bounds.
    ///
    /// # Returns
    /// Whether the value changed.
    pub fn set(&mut self, value: i64) -> bool {
        let old = self.value;
        self.value = value.clamp(self.min(), self.max());
        old != self.value
    }

    /// Position of the value within the bounds, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let (min, max) = self.field.bounds();
        (self.value - min) as f64 / (max - min) as f64
    }
}

/// Every control on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    sliders: [Slider; 5],
    neighborhood: Neighborhood,
}

impl Controls {
    /// Initial control state: defaults truncated to integers, first neighborhood selected.
    pub fn from_defaults(defaults: &DefaultFeatures) -> Self {
        let sliders = Field::ALL.map(|field| {
            let raw = defaults.numeric(field.key()).unwrap_or_default();
            let truncated = raw.trunc() as i64;
            let slider = Slider::new(field, truncated);
            if slider.value() != truncated {
                log::warn!(
                    "default {}={raw} is outside [{}, {}], clamped to {}",
                    field.key(),
                    slider.min(),
                    slider.max(),
                    slider.value()
                );
            }
            slider
        });

        Self {
            sliders,
            neighborhood: Neighborhood::default(),
        }
    }

    pub fn sliders(&self) -> &[Slider; 5] {
        &self.sliders
    }

    pub fn slider(&self, field: Field) -> &Slider {
        &self.sliders[Self::slot(field)]
    }

    pub fn slider_mut(&mut self, field: Field) -> &mut Slider {
        &mut self.sliders[Self::slot(field)]
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn set_neighborhood(&mut self, neighborhood: Neighborhood) -> bool {
        let changed = self.neighborhood != neighborhood;
        self.neighborhood = neighborhood;
        changed
    }

    /// Snapshot of the current selections.
    pub fn inputs(&self) -> PropertyInputs {
        PropertyInputs {
            gr_liv_area: self.slider(Field::LivingArea).value(),
            overall_qual: self.slider(Field::OverallQuality).value(),
            year_built: self.slider(Field::YearBuilt).value(),
            total_bsmt_sf: self.slider(Field::BasementArea).value(),
            garage_cars: self.slider(Field::GarageCapacity).value(),
            neighborhood: self.neighborhood,
        }
    }

    fn slot(field: Field) -> usize {
        match field {
            Field::LivingArea => 0,
            Field::OverallQuality => 1,
            Field::YearBuilt => 2,
            Field::BasementArea => 3,
            Field::GarageCapacity => 4,
        }
    }
}
