use std::collections::{BTreeMap, BTreeSet};

use crate::{
    error::{AppraisalError, Result},
    features::{DefaultFeatures, FeatureRow, FeatureValue},
    pipeline::Column,
};

pub const TARGET: &str = "SalePrice";
const ID: &str = "Id";

/// Values of one CSV column after kind inference.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnData {
    pub name: String,
    pub values: ColumnValues,
}

impl ColumnData {
    fn infer(name: String, raw: Vec<Option<String>>) -> Self {
        let numeric: Option<Vec<Option<f64>>> = raw
            .iter()
            .map(|v| match v {
                Some(s) => s.parse::<f64>().ok().map(Some),
                None => Some(None),
            })
            .collect();

        let values = match numeric {
            Some(values) => ColumnValues::Numeric(values),
            None => ColumnValues::Categorical(raw),
        };

        Self { name, values }
    }

    /// Mean for numeric columns, most frequent value for categorical ones.
    fn default_value(&self) -> FeatureValue {
        match &self.values {
            ColumnValues::Numeric(values) => {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                if present.is_empty() {
                    return FeatureValue::Missing;
                }
                FeatureValue::Numeric(present.iter().sum::<f64>() / present.len() as f64)
            }
            ColumnValues::Categorical(values) => {
                let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
                for v in values.iter().flatten() {
                    *counts.entry(v.as_str()).or_default() += 1;
                }
                // BTreeMap iterates in key order, so ties keep the smallest key.
                counts
                    .into_iter()
                    .fold(None, |best: Option<(&str, usize)>, (k, n)| match best {
                        Some((_, m)) if m >= n => best,
                        _ => Some((k, n)),
                    })
                    .map(|(k, _)| FeatureValue::Categorical(k.to_string()))
                    .unwrap_or(FeatureValue::Missing)
            }
        }
    }

    /// Preprocessing step fitted on this column.
    fn column_spec(&self) -> Column {
        match &self.values {
            ColumnValues::Numeric(values) => {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                let n = present.len().max(1) as f64;
                let mean = present.iter().sum::<f64>() / n;
                let var = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                Column::Numeric {
                    name: self.name.clone(),
                    mean,
                    scale: if std > 0.0 { std } else { 1.0 },
                }
            }
            ColumnValues::Categorical(values) => {
                let categories: BTreeSet<&String> = values.iter().flatten().collect();
                Column::Categorical {
                    name: self.name.clone(),
                    categories: categories.into_iter().cloned().collect(),
                }
            }
        }
    }

    fn value(&self, i: usize) -> FeatureValue {
        match &self.values {
            ColumnValues::Numeric(values) => match values[i] {
                Some(x) => FeatureValue::Numeric(x),
                None => FeatureValue::Missing,
            },
            ColumnValues::Categorical(values) => match &values[i] {
                Some(s) => FeatureValue::Categorical(s.clone()),
                None => FeatureValue::Missing,
            },
        }
    }
}

/// The Ames training table: feature columns plus the sale price target.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub columns: Vec<ColumnData>,
    pub target: Vec<f64>,
}

impl TrainingSet {
    /// Parses a comma-separated table with a header row.
    ///
    /// `NA` and empty cells are missing values. The `Id` column is dropped and
    /// `SalePrice` becomes the target.
    ///
    /// # Errors
    /// Returns `Dataset` with the offending line number for ragged rows, a missing
    /// target column, or an unusable target value.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines.next().ok_or(AppraisalError::Dataset {
            line: 1,
            msg: "empty file".into(),
        })?;
        let header: Vec<String> = split_row(header)
            .into_iter()
            .map(|h| h.unwrap_or_default())
            .collect();

        let target_idx = header
            .iter()
            .position(|h| h == TARGET)
            .ok_or_else(|| AppraisalError::Dataset {
                line: 1,
                msg: format!("missing {TARGET} column"),
            })?;

        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
        let mut target = Vec::new();

        for (i, line) in lines {
            let line_no = i + 1;
            let cells = split_row(line);
            if cells.len() != header.len() {
                return Err(AppraisalError::Dataset {
                    line: line_no,
                    msg: format!("expected {} values, got {}", header.len(), cells.len()),
                });
            }

            let price = cells[target_idx]
                .as_deref()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|p| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| AppraisalError::Dataset {
                    line: line_no,
                    msg: format!("{TARGET} must be a non-negative number"),
                })?;
            target.push(price);

            for (col, cell) in raw.iter_mut().zip(cells) {
                col.push(cell);
            }
        }

        if target.is_empty() {
            return Err(AppraisalError::Dataset {
                line: 2,
                msg: "no data rows".into(),
            });
        }

        let columns = header
            .into_iter()
            .zip(raw)
            .enumerate()
            .filter(|(i, (name, _))| *i != target_idx && name != ID)
            .map(|(_, (name, values))| ColumnData::infer(name, values))
            .collect();

        Ok(Self { columns, target })
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Dataset-average defaults for every feature column.
    ///
    /// # Errors
    /// Returns an error if a column the form edits is absent or of the wrong kind.
    pub fn defaults(&self) -> Result<DefaultFeatures> {
        let values = self
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.default_value()))
            .collect();
        DefaultFeatures::new(values)
    }

    /// One fitted preprocessing column per feature, in CSV order.
    pub fn column_specs(&self) -> Vec<Column> {
        self.columns.iter().map(ColumnData::column_spec).collect()
    }

    /// All feature values of row `i`.
    pub fn row(&self, i: usize) -> FeatureRow {
        FeatureRow::from_values(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.value(i)))
                .collect(),
        )
    }
}

fn split_row(line: &str) -> Vec<Option<String>> {
    line.split(',')
        .map(|cell| {
            let cell = cell.trim().trim_matches('"');
            if cell.is_empty() || cell == "NA" {
                None
            } else {
                Some(cell.to_string())
            }
        })
        .collect()
}
