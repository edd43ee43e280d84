use crate::{features::PropertyInputs, predictor::Estimate};

/// Rupees per lakh.
pub const LAKH: f64 = 100_000.0;

pub const TITLE: &str = "AI Real Estate Appraiser";

pub const DATA_SOURCE_NOTICE: [&str; 3] = [
    "Data Source: this model is trained on real estate data from Ames, Iowa (USA).",
    "Predictions are in USD ($) based on 2010 market conditions.",
    "(INR conversion provided for reference)",
];

pub const MISSING_ASSETS_MESSAGE: &str = "Error: Model files not found. Please run the training step first to generate the asset files!";

/// Quality tier note shown under an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    Premium,
    FixerUpper,
}

impl Advisory {
    /// First match wins: 8 and above is premium, 4 and below is a fixer-upper.
    pub fn for_quality(overall_qual: i64) -> Option<Self> {
        if overall_qual >= 8 {
            Some(Self::Premium)
        } else if overall_qual <= 4 {
            Some(Self::FixerUpper)
        } else {
            None
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Premium => {
                "Premium Property: High quality construction significantly boosts valuation."
            }
            Self::FixerUpper => {
                "Fixer-Upper: Valuation assumes standard condition; renovation needs may lower actual price."
            }
        }
    }
}

/// The three live summary metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub size: String,
    pub quality: String,
    pub location: String,
}

impl Summary {
    pub fn of(inputs: &PropertyInputs) -> Self {
        Self {
            size: format!("{} sqft", inputs.gr_liv_area),
            quality: format!("{}/10", inputs.overall_qual),
            location: inputs.neighborhood.code().to_string(),
        }
    }
}

/// Everything printed for one estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub estimate: Estimate,
    pub usd: String,
    pub lakhs: String,
    pub advisory: Option<Advisory>,
}

impl Report {
    /// Formats `estimate`; the advisory follows the quality it was computed with.
    pub fn new(estimate: Estimate, overall_qual: i64) -> Self {
        Self {
            estimate,
            usd: format!("${}", with_thousands(estimate.price_usd, 2)),
            lakhs: with_thousands(estimate.price_local / LAKH, 2),
            advisory: Advisory::for_quality(overall_qual),
        }
    }

    pub fn headline(&self) -> String {
        format!("Estimated Value: {}", self.usd)
    }

    pub fn caption(&self) -> String {
        format!("(Approx. ₹{} Lakhs INR)", self.lakhs)
    }
}

/// Formats `value` with `decimals` places and comma thousands separators.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::Neighborhood;

    #[test]
    fn advisory_boundaries() {
        assert_eq!(Advisory::for_quality(10), Some(Advisory::Premium));
        assert_eq!(Advisory::for_quality(8), Some(Advisory::Premium));
        assert_eq!(Advisory::for_quality(7), None);
        assert_eq!(Advisory::for_quality(5), None);
        assert_eq!(Advisory::for_quality(4), Some(Advisory::FixerUpper));
        assert_eq!(Advisory::for_quality(1), Some(Advisory::FixerUpper));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(with_thousands(0.0, 2), "0.00");
        assert_eq!(with_thousands(999.994, 2), "999.99");
        assert_eq!(with_thousands(999.995_1, 2), "1,000.00");
        assert_eq!(with_thousands(162_753.791_419, 2), "162,753.79");
        assert_eq!(with_thousands(13_508_564.687_8, 2), "13,508,564.69");
        assert_eq!(with_thousands(-1234.5, 2), "-1,234.50");
        assert_eq!(with_thousands(-0.001, 2), "0.00");
        assert_eq!(with_thousands(1234567.0, 0), "1,234,567");
        assert_eq!(with_thousands(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn report_for_premium_estimate() {
        let report = Report::new(Estimate::from_log_price(12.0), 9);

        assert_eq!(report.usd, "$162,753.79");
        assert_eq!(report.lakhs, "135.09");
        assert_eq!(report.headline(), "Estimated Value: $162,753.79");
        assert_eq!(report.caption(), "(Approx. ₹135.09 Lakhs INR)");
        assert_eq!(report.advisory, Some(Advisory::Premium));
    }

    #[test]
    fn summary_metrics() {
        let summary = Summary::of(&PropertyInputs {
            gr_liv_area: 1500,
            overall_qual: 6,
            year_built: 1973,
            total_bsmt_sf: 1000,
            garage_cars: 2,
            neighborhood: Neighborhood::NAmes,
        });

        assert_eq!(summary.size, "1500 sqft");
        assert_eq!(summary.quality, "6/10");
        assert_eq!(summary.location, "NAmes");
    }
}
