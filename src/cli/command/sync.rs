use std::path::Path;

use anyhow::Result;
use chrono::Local;

use crate::{
    cli::create_spinner,
    fetch::ClimateSite,
    store::WeatherStore,
    sync::{self, SyncMode, SyncOutcome},
};

pub async fn full(database: &Path) -> Result<SyncOutcome> {
    run(SyncMode::Full, database, "Scraping the full temperature history...").await
}

pub async fn update(database: &Path) -> Result<SyncOutcome> {
    run(SyncMode::Update, database, "Scraping newer temperatures...").await
}

async fn run(mode: SyncMode, database: &Path, message: &str) -> Result<SyncOutcome> {
    let store = WeatherStore::open(database)?;
    store.initialize_schema()?;
    let site = ClimateSite::new()?;

    let bar = create_spinner(message.to_string());
    let outcome = sync::run(mode, Local::now().date_naive(), &site, &store).await?;
    bar.finish_and_clear();

    Ok(outcome)
}
