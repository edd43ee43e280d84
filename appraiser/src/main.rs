use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use log::info;

use appraiser::{AssetPaths, TrainConfig, training};

const USAGE: &str = "usage: appraiser <train.csv> [out_dir]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(csv_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let csv = fs::read_to_string(&csv_path)
        .with_context(|| format!("cannot read '{}'", csv_path.display()))?;

    let cfg = TrainConfig::default();
    info!(
        "training on {} (epochs={}, lr={}, batch_size={}, l2={}, seed={})",
        csv_path.display(),
        cfg.epochs,
        cfg.learning_rate,
        cfg.batch_size,
        cfg.l2,
        cfg.seed
    );

    let outcome = training::train(&csv, &cfg)?;
    info!("final training rmse(log)={:.5}", outcome.rmse);

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create '{}'", out_dir.display()))?;
    let paths = AssetPaths::in_dir(&out_dir);
    outcome.assets.save(&paths)?;

    info!(
        "wrote {} and {}",
        paths.model.display(),
        paths.defaults.display()
    );
    Ok(())
}
