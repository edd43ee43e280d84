use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppraisalError, Result},
    neighborhood::Neighborhood,
};

pub const GR_LIV_AREA: &str = "GrLivArea";
pub const OVERALL_QUAL: &str = "OverallQual";
pub const YEAR_BUILT: &str = "YearBuilt";
pub const TOTAL_BSMT_SF: &str = "TotalBsmtSF";
pub const GARAGE_CARS: &str = "GarageCars";
pub const NEIGHBORHOOD: &str = "Neighborhood";

/// The numeric keys the form lets the user override.
pub const EDITABLE_NUMERIC: [&str; 5] =
    [GR_LIV_AREA, OVERALL_QUAL, YEAR_BUILT, TOTAL_BSMT_SF, GARAGE_CARS];

/// A single model input value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
    /// Serialized as `null`; the pipeline imputes it.
    Missing,
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Categorical(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Dataset-average value for every model input.
///
/// Construction checks that the keys the form edits exist with the right kind,
/// so a mismatch surfaces at load time instead of at prediction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, FeatureValue>",
    into = "BTreeMap<String, FeatureValue>"
)]
pub struct DefaultFeatures {
    values: BTreeMap<String, FeatureValue>,
}

impl DefaultFeatures {
    /// Validates and wraps a feature mapping.
    ///
    /// # Errors
    /// Returns `MissingFeature` or `FeatureKind` if an editable key is absent or
    /// holds the wrong kind of value.
    pub fn new(values: BTreeMap<String, FeatureValue>) -> Result<Self> {
        for name in EDITABLE_NUMERIC {
            match values.get(name) {
                Some(FeatureValue::Numeric(_)) => {}
                Some(_) => {
                    return Err(AppraisalError::FeatureKind {
                        name: name.to_string(),
                        expected: "numeric",
                    });
                }
                None => return Err(AppraisalError::MissingFeature(name.to_string())),
            }
        }

        match values.get(NEIGHBORHOOD) {
            Some(FeatureValue::Categorical(_)) => {}
            Some(_) => {
                return Err(AppraisalError::FeatureKind {
                    name: NEIGHBORHOOD.to_string(),
                    expected: "categorical",
                });
            }
            None => return Err(AppraisalError::MissingFeature(NEIGHBORHOOD.to_string())),
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    /// Value of an editable numeric key. Always present after construction.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FeatureValue::as_f64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl TryFrom<BTreeMap<String, FeatureValue>> for DefaultFeatures {
    type Error = AppraisalError;

    fn try_from(values: BTreeMap<String, FeatureValue>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<DefaultFeatures> for BTreeMap<String, FeatureValue> {
    fn from(defaults: DefaultFeatures) -> Self {
        defaults.values
    }
}

/// One full row of model inputs.
///
/// Rows handed to the form are built from a [`DefaultFeatures`], so they carry
/// exactly its key set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: BTreeMap<String, FeatureValue>,
}

impl FeatureRow {
    pub(crate) fn from_values(values: BTreeMap<String, FeatureValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The values currently selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInputs {
    pub gr_liv_area: i64,
    pub overall_qual: i64,
    pub year_built: i64,
    pub total_bsmt_sf: i64,
    pub garage_cars: i64,
    pub neighborhood: Neighborhood,
}

/// Overlays the form inputs on the defaults.
pub fn assemble(defaults: &DefaultFeatures, inputs: &PropertyInputs) -> FeatureRow {
    let mut values = defaults.values.clone();

    let overrides = [
        (GR_LIV_AREA, inputs.gr_liv_area),
        (OVERALL_QUAL, inputs.overall_qual),
        (YEAR_BUILT, inputs.year_built),
        (TOTAL_BSMT_SF, inputs.total_bsmt_sf),
        (GARAGE_CARS, inputs.garage_cars),
    ];

    for (name, value) in overrides {
        values.insert(name.to_string(), FeatureValue::Numeric(value as f64));
    }
    values.insert(
        NEIGHBORHOOD.to_string(),
        FeatureValue::Categorical(inputs.neighborhood.code().to_string()),
    );

    FeatureRow { values }
}
