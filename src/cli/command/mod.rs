pub mod report;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};

pub use report::{boxplot, lineplot};
pub use sync::{full, update};

/// Default location for the files this tool writes.
pub fn home_file(file_name: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot locate a home directory")?;

    Ok(home.join(file_name))
}
