use std::{
    env,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

pub const MODEL_FILE: &str = "house_price_model.json";
pub const DEFAULTS_FILE: &str = "house_price_defaults.json";

/// Environment variable that moves the asset directory away from the working directory.
pub const ASSET_DIR_VAR: &str = "APPRAISER_ASSET_DIR";

/// Where the two asset files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub model: PathBuf,
    pub defaults: PathBuf,
}

impl AssetPaths {
    /// Both asset files inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            defaults: dir.join(DEFAULTS_FILE),
        }
    }

    /// Reads [`ASSET_DIR_VAR`], falling back to the working directory.
    pub fn from_env() -> Self {
        match env::var_os(ASSET_DIR_VAR) {
            Some(dir) => Self::in_dir(dir),
            None => Self::default(),
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(MODEL_FILE),
            defaults: PathBuf::from(DEFAULTS_FILE),
        }
    }
}

/// Hyper-parameters for fitting the linear pipeline.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: NonZeroUsize,
    pub learning_rate: f64,
    pub batch_size: NonZeroUsize,
    /// L2 penalty on the coefficients (not the intercept).
    pub l2: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: NonZeroUsize::new(300).unwrap_or(NonZeroUsize::MIN),
            learning_rate: 0.01,
            batch_size: NonZeroUsize::new(32).unwrap_or(NonZeroUsize::MIN),
            l2: 1e-3,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_are_relative_file_names() {
        let paths = AssetPaths::default();
        assert_eq!(paths.model, PathBuf::from("house_price_model.json"));
        assert_eq!(paths.defaults, PathBuf::from("house_price_defaults.json"));
    }

    #[test]
    fn in_dir_joins() {
        let paths = AssetPaths::in_dir("/srv/assets");
        assert_eq!(paths.model, Path::new("/srv/assets").join(MODEL_FILE));
        assert_eq!(paths.defaults, Path::new("/srv/assets").join(DEFAULTS_FILE));
    }
}
