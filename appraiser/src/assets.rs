use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::AssetPaths,
    error::{AppraisalError, Result},
    features::DefaultFeatures,
    pipeline::Pipeline,
};

/// The trained model and the defaults it is fed from.
///
/// Loaded once per process and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Assets {
    pub model: Pipeline,
    pub defaults: DefaultFeatures,
}

impl Assets {
    /// Bundles a model with its defaults after checking they fit together.
    ///
    /// # Errors
    /// Returns an error if the model is malformed or needs a feature the defaults lack.
    pub fn new(model: Pipeline, defaults: DefaultFeatures) -> Result<Self> {
        model.validate()?;
        model.check_schema(&defaults)?;
        Ok(Self { model, defaults })
    }

    /// Writes both assets as pretty JSON.
    ///
    /// # Errors
    /// Returns `Io` if either file cannot be written.
    pub fn save(&self, paths: &AssetPaths) -> Result<()> {
        write_json(&paths.model, &self.model)?;
        write_json(&paths.defaults, &self.defaults)
    }
}

/// Loads the model and defaults.
///
/// # Returns
/// `Ok(None)` when either file does not exist; the caller decides how to halt.
///
/// # Errors
/// Any other read, decode or validation failure.
pub fn load_assets(paths: &AssetPaths) -> Result<Option<Assets>> {
    let model = match read_json::<Pipeline>(&paths.model) {
        Ok(model) => model,
        Err(e) if e.is_not_found() => {
            log::warn!("model file not found at {}", paths.model.display());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let defaults = match read_json::<DefaultFeatures>(&paths.defaults) {
        Ok(defaults) => defaults,
        Err(e) if e.is_not_found() => {
            log::warn!("defaults file not found at {}", paths.defaults.display());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let assets = Assets::new(model, defaults)?;
    log::info!(
        "loaded model with {} columns ({} encoded) and {} defaults",
        assets.model.columns.len(),
        assets.model.width(),
        assets.defaults.len()
    );
    Ok(Some(assets))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| AppraisalError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| AppraisalError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| AppraisalError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        AppraisalError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(io_err)
}
