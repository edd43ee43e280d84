mod dataset;
mod fit;

use ndarray::{Array1, Array2};

pub use dataset::{ColumnData, ColumnValues, TARGET, TrainingSet};
pub use fit::{LinearTrainer, fit_linear};

use crate::{assets::Assets, config::TrainConfig, error::Result};

/// Result of a training run.
#[derive(Debug)]
pub struct TrainOutcome {
    pub assets: Assets,
    /// Training RMSE on the log1p scale.
    pub rmse: f64,
}

/// Builds both assets from the Ames training CSV.
///
/// # Errors
/// Returns an error if the CSV is malformed, lacks the form's features, or training diverges.
pub fn train(csv: &str, cfg: &TrainConfig) -> Result<TrainOutcome> {
    let set = TrainingSet::parse(csv)?;
    log::info!("parsed {} rows, {} feature columns", set.len(), set.columns.len());

    let defaults = set.defaults()?;
    let encoder = crate::pipeline::Pipeline {
        columns: set.column_specs(),
        estimator: crate::pipeline::Estimator::Linear {
            intercept: 0.0,
            coef: Vec::new(),
        },
    };

    let width = encoder.width();
    let mut x = Array2::zeros((set.len(), width));
    for (i, mut out) in x.rows_mut().into_iter().enumerate() {
        out.assign(&encoder.encode(&set.row(i))?);
    }
    let y = Array1::from_iter(set.target.iter().map(|p| p.ln_1p()));
    log::info!("encoded {} features", width);

    let (model, rmse) = fit_linear(encoder.columns, &x, &y, cfg)?;
    let assets = Assets::new(model, defaults)?;
    Ok(TrainOutcome { assets, rmse })
}
