//! File logging. The terminal belongs to the UI, so records go to
//! `<cache_dir>/tunesheet/tunesheet.log`; `RUST_LOG` sets the filter.

use color_eyre::Result;
use eyre::WrapErr;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tunesheet")
        .join("tunesheet.log")
}

pub fn init() -> Result<PathBuf> {
    let path = default_log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("cannot create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("cannot open log file {:?}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(path)
}
