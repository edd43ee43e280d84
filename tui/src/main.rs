use std::{env, fs::File};

use anyhow::{Context, Result};

mod app;
mod state;
mod ui;

const LOG_FILE: &str = "appraiser.log";

fn main() -> Result<()> {
    init_logging()?;
    app::run::run()
}

/// The terminal belongs to the UI, so logs go to a file and only when asked for.
fn init_logging() -> Result<()> {
    if env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let file = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
