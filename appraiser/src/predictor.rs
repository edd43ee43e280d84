use crate::{error::Result, features::FeatureRow, pipeline::Regressor};

/// Approximate USD to INR rate. Fixed; it is not refreshed from any source.
pub const USD_TO_INR: f64 = 83.0;

/// One priced request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub log_price: f64,
    pub price_usd: f64,
    pub price_local: f64,
}

impl Estimate {
    /// Reverses the log1p transform and converts to the local currency.
    pub fn from_log_price(log_price: f64) -> Self {
        let price_usd = log_price.exp_m1();
        Self {
            log_price,
            price_usd,
            price_local: price_usd * USD_TO_INR,
        }
    }

    /// False for negative or non-finite prices. No clamp is applied to those.
    pub fn is_plausible(&self) -> bool {
        self.price_usd.is_finite() && self.price_usd >= 0.0
    }
}

/// Prices a full feature row.
///
/// # Errors
/// Propagates the model's error if `row` does not fit its schema.
pub fn estimate<R: Regressor + ?Sized>(model: &R, row: &FeatureRow) -> Result<Estimate> {
    let log_price = model.predict(row)?;
    let estimate = Estimate::from_log_price(log_price);

    log::debug!(
        "log_price={log_price:.6} usd={:.2} inr={:.2}",
        estimate.price_usd,
        estimate.price_local
    );
    if !estimate.is_plausible() {
        log::warn!("implausible estimate: log_price={log_price}, usd={}", estimate.price_usd);
    }

    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppraisalError,
        features::{PropertyInputs, assemble, tests::sample_defaults},
        neighborhood::Neighborhood,
    };

    struct Fixed(f64);

    impl Regressor for Fixed {
        fn predict(&self, _row: &FeatureRow) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl Regressor for Broken {
        fn predict(&self, _row: &FeatureRow) -> Result<f64> {
            Err(AppraisalError::MissingFeature("LotArea".into()))
        }
    }

    fn row() -> FeatureRow {
        assemble(
            &sample_defaults(),
            &PropertyInputs {
                gr_liv_area: 1500,
                overall_qual: 6,
                year_built: 1973,
                total_bsmt_sf: 1000,
                garage_cars: 2,
                neighborhood: Neighborhood::NAmes,
            },
        )
    }

    #[test]
    fn local_price_is_exact_multiple() {
        for log_price in [-3.0, 0.0, 0.5, 10.0, 11.7, 12.0, 13.5] {
            let e = Estimate::from_log_price(log_price);
            assert_eq!(e.price_local, e.price_usd * 83.0);
        }
    }

    #[test]
    fn expm1_matches_reference() {
        for log_price in [1e-10, 0.1, 1.0, 8.5, 12.0, 13.0] {
            let e = Estimate::from_log_price(log_price);
            let reference = log_price.exp() - 1.0;
            assert!((e.price_usd - reference).abs() <= 1e-9 * reference.abs().max(1.0));
        }
    }

    #[test]
    fn stub_model_price() {
        let e = estimate(&Fixed(12.0), &row()).unwrap();

        assert_eq!(e.log_price, 12.0);
        assert!((e.price_usd - 162_753.791_419).abs() < 1e-3);
        assert!((e.price_local - 162_753.791_419 * 83.0).abs() < 1e-1);
        assert!(e.is_plausible());
    }

    #[test]
    fn very_low_log_price_is_flagged_not_clamped() {
        let e = estimate(&Fixed(-5.0), &row()).unwrap();
        assert!(e.price_usd < 0.0);
        assert!(!e.is_plausible());

        let e = Estimate::from_log_price(f64::INFINITY);
        assert!(!e.is_plausible());
    }

    #[test]
    fn model_errors_propagate() {
        assert!(matches!(
            estimate(&Broken, &row()),
            Err(AppraisalError::MissingFeature(_))
        ));
    }

    #[test]
    fn works_through_trait_objects() {
        let model: Box<dyn Regressor> = Box::new(Fixed(0.0));
        let e = estimate(model.as_ref(), &row()).unwrap();
        assert_eq!(e.price_usd, 0.0);
    }
}
