pub mod assets;
pub mod config;
pub mod controls;
pub mod error;
pub mod features;
pub mod neighborhood;
pub mod pipeline;
pub mod predictor;
pub mod presenter;
pub mod training;

pub use assets::{Assets, load_assets};
pub use config::{AssetPaths, TrainConfig};
pub use controls::{Controls, Field, Slider};
pub use error::{AppraisalError, Result};
pub use features::{DefaultFeatures, FeatureRow, FeatureValue, PropertyInputs, assemble};
pub use neighborhood::Neighborhood;
pub use pipeline::{Pipeline, Regressor};
pub use predictor::{Estimate, USD_TO_INR, estimate};
pub use presenter::{Advisory, Report, Summary};
