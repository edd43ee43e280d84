use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppraisalError, Result},
    features::{DefaultFeatures, FeatureRow, FeatureValue},
};

/// Anything that maps a full feature row to a log-scale price.
pub trait Regressor: Send + Sync {
    /// Predicts the log1p-transformed sale price for `row`.
    ///
    /// # Errors
    /// Returns an error if `row` does not match the model's input schema.
    fn predict(&self, row: &FeatureRow) -> Result<f64>;
}

/// How one input column is turned into encoded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Column {
    /// Standardized as `(x - mean) / scale`; a missing value encodes to 0.
    Numeric { name: String, mean: f64, scale: f64 },
    /// One-hot over `categories`; unknown or missing values encode to all zeros.
    Categorical {
        name: String,
        categories: Vec<String>,
    },
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name, .. } | Self::Categorical { name, .. } => name,
        }
    }

    /// Number of encoded values this column produces.
    pub fn width(&self) -> usize {
        match self {
            Self::Numeric { .. } => 1,
            Self::Categorical { categories, .. } => categories.len(),
        }
    }

    fn encode_into(&self, value: &FeatureValue, out: &mut [f64]) -> Result<()> {
        match (self, value) {
            (Self::Numeric { mean, scale, .. }, FeatureValue::Numeric(x)) => {
                out[0] = (x - mean) / scale;
            }
            (Self::Numeric { .. }, FeatureValue::Missing) => out[0] = 0.0,
            (Self::Categorical { categories, .. }, FeatureValue::Categorical(s)) => {
                out.fill(0.0);
                if let Some(i) = categories.iter().position(|c| c == s) {
                    out[i] = 1.0;
                }
            }
            (Self::Categorical { .. }, FeatureValue::Missing) => out.fill(0.0),
            (Self::Numeric { name, .. }, _) => {
                return Err(AppraisalError::FeatureKind {
                    name: name.clone(),
                    expected: "numeric",
                });
            }
            (Self::Categorical { name, .. }, _) => {
                return Err(AppraisalError::FeatureKind {
                    name: name.clone(),
                    expected: "categorical",
                });
            }
        }
        Ok(())
    }

    fn accepts(&self, value: &FeatureValue) -> bool {
        matches!(
            (self, value),
            (_, FeatureValue::Missing)
                | (Self::Numeric { .. }, FeatureValue::Numeric(_))
                | (Self::Categorical { .. }, FeatureValue::Categorical(_))
        )
    }
}

/// A node of a regression tree, stored in a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Go to `left` when `x[feature] < threshold`, else to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn eval(&self, x: ArrayView1<f64>) -> Result<f64> {
        let mut idx = 0;
        // A valid tree reaches a leaf in fewer hops than it has nodes.
        for _ in 0..self.nodes.len() {
            match self.nodes[idx] {
                Node::Leaf { value } => return Ok(value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => idx = if x[feature] < threshold { left } else { right },
            }
        }
        Err(AppraisalError::InvalidModel("tree contains a cycle".into()))
    }

    fn validate(&self, width: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(AppraisalError::InvalidModel("empty tree".into()));
        }

        for node in &self.nodes {
            if let Node::Split {
                feature,
                threshold,
                left,
                right,
            } = *node
            {
                if feature >= width {
                    return Err(AppraisalError::InvalidModel(format!(
                        "split on feature {feature}, encoded width is {width}"
                    )));
                }
                if left >= self.nodes.len() || right >= self.nodes.len() {
                    return Err(AppraisalError::InvalidModel(format!(
                        "child index out of range ({left}, {right})"
                    )));
                }
                if threshold.is_nan() {
                    return Err(AppraisalError::InvalidModel("NaN split threshold".into()));
                }
            }
        }
        Ok(())
    }
}

/// The regression head applied to encoded rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear { intercept: f64, coef: Vec<f64> },
    TreeEnsemble { base_score: f64, trees: Vec<Tree> },
}

impl Estimator {
    fn predict(&self, x: ArrayView1<f64>) -> Result<f64> {
        match self {
            Self::Linear { intercept, coef } => {
                let coef = ArrayView1::from(coef.as_slice());
                Ok(coef.dot(&x) + intercept)
            }
            Self::TreeEnsemble { base_score, trees } => trees
                .iter()
                .try_fold(*base_score, |acc, tree| tree.eval(x).map(|v| acc + v)),
        }
    }

    fn validate(&self, width: usize) -> Result<()> {
        match self {
            Self::Linear { coef, .. } => {
                if coef.len() != width {
                    return Err(AppraisalError::ShapeMismatch {
                        what: "coef",
                        got: coef.len(),
                        expected: width,
                    });
                }
                Ok(())
            }
            Self::TreeEnsemble { trees, .. } => {
                trees.iter().try_for_each(|tree| tree.validate(width))
            }
        }
    }
}

/// Preprocessing columns followed by a regression head.
///
/// This is the portable form of the trained model artifact: JSON on disk,
/// immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub columns: Vec<Column>,
    pub estimator: Estimator,
}

impl Pipeline {
    /// Total number of encoded values.
    pub fn width(&self) -> usize {
        self.columns.iter().map(Column::width).sum()
    }

    /// Checks internal consistency: scales, coefficient count, tree structure.
    ///
    /// # Errors
    /// Returns `InvalidModel` or `ShapeMismatch` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(AppraisalError::InvalidModel("pipeline has no columns".into()));
        }

        for col in &self.columns {
            if let Column::Numeric { name, mean, scale } = col {
                if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                    return Err(AppraisalError::InvalidModel(format!(
                        "column {name}: mean and scale must be finite, scale non-zero"
                    )));
                }
            }
        }

        self.estimator.validate(self.width())
    }

    /// Checks that every column can be fed from `defaults`.
    ///
    /// # Errors
    /// Returns `MissingFeature` or `FeatureKind` for the first incompatible column.
    pub fn check_schema(&self, defaults: &DefaultFeatures) -> Result<()> {
        for col in &self.columns {
            let value = defaults
                .get(col.name())
                .ok_or_else(|| AppraisalError::MissingFeature(col.name().to_string()))?;
            if !col.accepts(value) {
                return Err(AppraisalError::FeatureKind {
                    name: col.name().to_string(),
                    expected: match col {
                        Column::Numeric { .. } => "numeric",
                        Column::Categorical { .. } => "categorical",
                    },
                });
            }
        }
        Ok(())
    }

    /// Encodes `row` into the estimator's input vector.
    ///
    /// # Errors
    /// Returns an error if a column is missing from `row` or has the wrong kind.
    pub fn encode(&self, row: &FeatureRow) -> Result<Array1<f64>> {
        let mut x = Array1::zeros(self.width());
        let out = x
            .as_slice_mut()
            .ok_or_else(|| AppraisalError::InvalidModel("non-contiguous buffer".into()))?;

        let mut offset = 0;
        for col in &self.columns {
            let value = row
                .get(col.name())
                .ok_or_else(|| AppraisalError::MissingFeature(col.name().to_string()))?;
            let width = col.width();
            col.encode_into(value, &mut out[offset..offset + width])?;
            offset += width;
        }

        Ok(x)
    }

    /// Runs the estimator on an already encoded row.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `x` does not have the encoded width.
    pub fn predict_encoded(&self, x: ArrayView1<f64>) -> Result<f64> {
        if x.len() != self.width() {
            return Err(AppraisalError::ShapeMismatch {
                what: "encoded row",
                got: x.len(),
                expected: self.width(),
            });
        }
        self.estimator.predict(x)
    }
}

impl Regressor for Pipeline {
    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        let x = self.encode(row)?;
        self.predict_encoded(x.view())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::Numeric {
                name: "GrLivArea".into(),
                mean: 1500.0,
                scale: 500.0,
            },
            Column::Categorical {
                name: "Neighborhood".into(),
                categories: vec!["NAmes".into(), "StoneBr".into()],
            },
        ]
    }

    fn row(area: FeatureValue, hood: FeatureValue) -> FeatureRow {
        FeatureRow::from_values(BTreeMap::from([
            ("GrLivArea".to_string(), area),
            ("Neighborhood".to_string(), hood),
        ]))
    }

    fn linear() -> Pipeline {
        Pipeline {
            columns: columns(),
            estimator: Estimator::Linear {
                intercept: 12.0,
                coef: vec![0.5, -0.1, 0.3],
            },
        }
    }

    #[test]
    fn encodes_standardized_and_one_hot() {
        let p = linear();
        let x = p
            .encode(&row(
                FeatureValue::Numeric(2500.0),
                FeatureValue::Categorical("StoneBr".into()),
            ))
            .unwrap();

        assert_eq!(x.to_vec(), vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_and_missing_encode_to_zero() {
        let p = linear();
        let x = p
            .encode(&row(
                FeatureValue::Missing,
                FeatureValue::Categorical("Blueste".into()),
            ))
            .unwrap();
        assert_eq!(x.to_vec(), vec![0.0, 0.0, 0.0]);

        let x = p
            .encode(&row(FeatureValue::Numeric(1500.0), FeatureValue::Missing))
            .unwrap();
        assert_eq!(x.to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn linear_prediction() {
        let p = linear();
        let y = p
            .predict(&row(
                FeatureValue::Numeric(2000.0),
                FeatureValue::Categorical("NAmes".into()),
            ))
            .unwrap();

        assert!((y - (12.0 + 0.5 - 0.1)).abs() < 1e-12);
    }

    #[test]
    fn tree_prediction() {
        let tree = Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: -0.2 },
                Node::Leaf { value: 0.3 },
            ],
        };
        let p = Pipeline {
            columns: columns(),
            estimator: Estimator::TreeEnsemble {
                base_score: 12.0,
                trees: vec![tree.clone(), tree],
            },
        };
        p.validate().unwrap();

        let hood = FeatureValue::Categorical("NAmes".into());
        let small = p.predict(&row(FeatureValue::Numeric(1000.0), hood.clone())).unwrap();
        let large = p.predict(&row(FeatureValue::Numeric(3000.0), hood)).unwrap();

        assert!((small - 11.6).abs() < 1e-12);
        assert!((large - 12.6).abs() < 1e-12);
    }

    #[test]
    fn cyclic_tree_is_an_error() {
        let p = Pipeline {
            columns: columns(),
            estimator: Estimator::TreeEnsemble {
                base_score: 0.0,
                trees: vec![Tree {
                    nodes: vec![Node::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 0,
                        right: 0,
                    }],
                }],
            },
        };
        p.validate().unwrap();

        let err = p
            .predict(&row(FeatureValue::Numeric(1.0), FeatureValue::Missing))
            .unwrap_err();
        assert!(matches!(err, AppraisalError::InvalidModel(_)));
    }

    #[test]
    fn validate_catches_structure_errors() {
        let mut p = linear();
        p.estimator = Estimator::Linear {
            intercept: 0.0,
            coef: vec![1.0],
        };
        assert!(matches!(
            p.validate(),
            Err(AppraisalError::ShapeMismatch { got: 1, expected: 3, .. })
        ));

        let mut p = linear();
        p.columns[0] = Column::Numeric {
            name: "GrLivArea".into(),
            mean: 0.0,
            scale: 0.0,
        };
        assert!(matches!(p.validate(), Err(AppraisalError::InvalidModel(_))));

        let p = Pipeline {
            columns: columns(),
            estimator: Estimator::TreeEnsemble {
                base_score: 0.0,
                trees: vec![Tree {
                    nodes: vec![Node::Split {
                        feature: 3,
                        threshold: 0.0,
                        left: 0,
                        right: 0,
                    }],
                }],
            },
        };
        assert!(matches!(p.validate(), Err(AppraisalError::InvalidModel(_))));
    }

    #[test]
    fn wrong_kind_and_missing_column() {
        let p = linear();

        let err = p
            .predict(&row(
                FeatureValue::Categorical("big".into()),
                FeatureValue::Missing,
            ))
            .unwrap_err();
        assert!(matches!(err, AppraisalError::FeatureKind { expected: "numeric", .. }));

        let partial = FeatureRow::from_values(BTreeMap::from([(
            "GrLivArea".to_string(),
            FeatureValue::Numeric(1.0),
        )]));
        assert!(matches!(
            p.predict(&partial),
            Err(AppraisalError::MissingFeature(name)) if name == "Neighborhood"
        ));
    }

    #[test]
    fn json_layout() {
        let json = r#"{
            "columns": [
                {"kind": "numeric", "name": "GrLivArea", "mean": 1500.0, "scale": 500.0},
                {"kind": "categorical", "name": "Neighborhood", "categories": ["NAmes", "StoneBr"]}
            ],
            "estimator": {"kind": "linear", "intercept": 12.0, "coef": [0.5, -0.1, 0.3]}
        }"#;

        let p: Pipeline = serde_json::from_str(json).unwrap();
        assert_eq!(p, linear());
    }
}
