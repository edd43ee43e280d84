use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    config::TrainConfig,
    error::{AppraisalError, Result},
    pipeline::{Column, Estimator, Pipeline},
};

/// Mini-batch gradient descent on squared error with an L2 penalty.
pub struct LinearTrainer {
    learning_rate: f64,
    l2: f64,
    coef: Array1<f64>,
    intercept: f64,
}

impl LinearTrainer {
    /// Creates a trainer for `width` encoded inputs.
    ///
    /// # Arguments
    /// * `width` - Number of encoded features.
    /// * `intercept` - Starting intercept, usually the target mean.
    /// * `learning_rate` - Step length of each update.
    /// * `l2` - Penalty applied to the coefficients.
    pub fn new(width: usize, intercept: f64, learning_rate: f64, l2: f64) -> Self {
        Self {
            learning_rate,
            l2,
            coef: Array1::zeros(width),
            intercept,
        }
    }

    /// Takes one step on a batch.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `x` and `y` disagree on rows or `x` has the wrong width.
    pub fn step(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(AppraisalError::ShapeMismatch {
                what: "batch targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }
        if x.ncols() != self.coef.len() {
            return Err(AppraisalError::ShapeMismatch {
                what: "batch width",
                got: x.ncols(),
                expected: self.coef.len(),
            });
        }
        if y.is_empty() {
            return Ok(());
        }

        let n = y.len() as f64;
        let residual = x.dot(&self.coef) + self.intercept - y;

        let grad_coef = x.t().dot(&residual) / n + &self.coef * self.l2;
        let grad_intercept = residual.sum() / n;

        self.coef.scaled_add(-self.learning_rate, &grad_coef);
        self.intercept -= self.learning_rate * grad_intercept;
        Ok(())
    }

    /// Root mean squared error over `(x, y)`.
    pub fn rmse(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> f64 {
        let residual = x.dot(&self.coef) + self.intercept - y;
        (residual.mapv(|r| r * r).sum() / y.len().max(1) as f64).sqrt()
    }

    pub fn into_estimator(self) -> Estimator {
        Estimator::Linear {
            intercept: self.intercept,
            coef: self.coef.to_vec(),
        }
    }
}

/// Fits a linear pipeline on encoded rows `x` against log-scale targets `y`.
///
/// # Returns
/// The pipeline and its final training RMSE (log scale).
///
/// # Errors
/// Returns `ShapeMismatch` if the inputs disagree with `columns`, or
/// `InvalidModel` if training diverged.
pub fn fit_linear(
    columns: Vec<Column>,
    x: &Array2<f64>,
    y: &Array1<f64>,
    cfg: &TrainConfig,
) -> Result<(Pipeline, f64)> {
    let width: usize = columns.iter().map(Column::width).sum();
    if x.ncols() != width {
        return Err(AppraisalError::ShapeMismatch {
            what: "encoded matrix",
            got: x.ncols(),
            expected: width,
        });
    }

    let mean = y.mean().unwrap_or_default();
    let mut trainer = LinearTrainer::new(width, mean, cfg.learning_rate, cfg.l2);

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut order: Vec<usize> = (0..x.nrows()).collect();
    let epochs = cfg.epochs.get();
    let log_every = (epochs / 10).max(1);

    for epoch in 1..=epochs {
        order.shuffle(&mut rng);

        for batch in order.chunks(cfg.batch_size.get()) {
            let xb = x.select(Axis(0), batch);
            let yb = y.select(Axis(0), batch);
            trainer.step(xb.view(), yb.view())?;
        }

        if epoch % log_every == 0 || epoch == epochs {
            let rmse = trainer.rmse(x.view(), y.view());
            if !rmse.is_finite() {
                return Err(AppraisalError::InvalidModel(format!(
                    "training diverged at epoch {epoch}, lower the learning rate"
                )));
            }
            log::info!("epoch {epoch}/{epochs}: rmse(log)={rmse:.5}");
        }
    }

    let rmse = trainer.rmse(x.view(), y.view());
    let pipeline = Pipeline {
        columns,
        estimator: trainer.into_estimator(),
    };
    Ok((pipeline, rmse))
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use ndarray::array;

    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::Numeric {
                name: "a".into(),
                mean: 0.0,
                scale: 1.0,
            },
            Column::Numeric {
                name: "b".into(),
                mean: 0.0,
                scale: 1.0,
            },
        ]
    }

    #[test]
    fn step_moves_towards_target() {
        let mut trainer = LinearTrainer::new(1, 0.0, 0.1, 0.0);
        let x = array![[1.0], [2.0]];
        let y = array![2.0, 4.0];

        let before = trainer.rmse(x.view(), y.view());
        trainer.step(x.view(), y.view()).unwrap();
        let after = trainer.rmse(x.view(), y.view());

        assert!(after < before);
    }

    #[test]
    fn step_rejects_mismatched_batch() {
        let mut trainer = LinearTrainer::new(2, 0.0, 0.1, 0.0);
        let x = array![[1.0, 2.0]];

        assert!(trainer.step(x.view(), array![1.0, 2.0].view()).is_err());
        assert!(trainer.step(array![[1.0]].view(), array![1.0].view()).is_err());
    }

    #[test]
    fn recovers_linear_relation() {
        // y = 3 + 0.5 a - 0.25 b
        let rows: Vec<[f64; 2]> = (0..40)
            .map(|i| {
                let a = (i % 8) as f64 - 3.5;
                let b = (i / 8) as f64 - 2.0;
                [a, b]
            })
            .collect();
        let x = Array2::from_shape_fn((rows.len(), 2), |(i, j)| rows[i][j]);
        let y = Array1::from_iter(rows.iter().map(|[a, b]| 3.0 + 0.5 * a - 0.25 * b));

        let cfg = TrainConfig {
            epochs: NonZeroUsize::new(400).unwrap(),
            learning_rate: 0.05,
            batch_size: NonZeroUsize::new(8).unwrap(),
            l2: 0.0,
            seed: 7,
        };

        let (pipeline, rmse) = fit_linear(columns(), &x, &y, &cfg).unwrap();
        assert!(rmse < 1e-3, "rmse {rmse}");

        let Estimator::Linear { intercept, coef } = pipeline.estimator else {
            panic!("expected linear estimator");
        };
        assert!((intercept - 3.0).abs() < 1e-2);
        assert!((coef[0] - 0.5).abs() < 1e-2);
        assert!((coef[1] + 0.25).abs() < 1e-2);
    }

    #[test]
    fn width_must_match_columns() {
        let x = Array2::zeros((2, 3));
        let y = Array1::zeros(2);
        assert!(matches!(
            fit_linear(columns(), &x, &y, &TrainConfig::default()),
            Err(AppraisalError::ShapeMismatch { got: 3, expected: 2, .. })
        ));
    }
}
