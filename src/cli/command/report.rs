use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{
    cli::{BoxplotArgs, LineplotArgs},
    plot, report,
    store::WeatherStore,
};

use super::home_file;

pub fn boxplot(database: &Path, args: &BoxplotArgs) -> Result<String> {
    let store = WeatherStore::open(database)?;
    store.initialize_schema()?;

    let months = report::monthly_means(&store, args.from_year, args.to_year);
    let path = output_path(
        args.output.as_ref(),
        format!("ecclimate-boxplot-{}-{}.svg", args.from_year, args.to_year),
    )?;
    plot::render_boxplot(&months, args.from_year, args.to_year, &path)?;

    Ok(path.to_string_lossy().to_string())
}

pub fn lineplot(database: &Path, args: &LineplotArgs) -> Result<String> {
    let store = WeatherStore::open(database)?;
    store.initialize_schema()?;

    let (days, means) = report::daily_series(&store, args.year, args.month);
    let path = output_path(
        args.output.as_ref(),
        format!("ecclimate-lineplot-{}-{:02}.svg", args.year, args.month),
    )?;
    plot::render_lineplot(&days, &means, args.year, args.month, &path)?;

    Ok(path.to_string_lossy().to_string())
}

fn output_path(explicit: Option<&PathBuf>, default_name: String) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.clone()),
        None => home_file(&default_name),
    }
}
