//! Month-page retrieval from the climate site.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

/// Station identifier for Winnipeg, MB.
pub const STATION_ID: u32 = 27174;

const BASE_URL: &str = "https://climate.weather.gc.ca/climate_data/daily_data_e.html";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of one month's daily-data page. The sync loop is generic over
/// this so tests can serve canned documents.
pub trait PageSource {
    fn fetch(&self, year: i32, month: u32) -> impl Future<Output = Result<String>> + Send;
}

/// Builds the daily-data URL for one month. `StartYear`, `EndYear` and
/// `Day` are form-state fields the daily view ignores, but the site
/// expects them present. `Month` goes unpadded.
pub fn page_url(year: i32, month: u32) -> String {
    format!(
        "{BASE_URL}?StationID={STATION_ID}&timeframe=2&StartYear=1840&EndYear=2020&Day=1&Year={year}&Month={month}"
    )
}

/// Live HTTP client for the climate site.
pub struct ClimateSite {
    client: Client,
}

impl ClimateSite {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ecclimate/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building the HTTP client")?;

        Ok(Self { client })
    }
}

impl PageSource for ClimateSite {
    async fn fetch(&self, year: i32, month: u32) -> Result<String> {
        let url = page_url(year, month);
        tracing::debug!(%url, "requesting month page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting `{url}`"))?;
        let markup = response.error_for_status()?.text().await?;

        Ok(markup)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_the_month_url() {
        let url = page_url(2020, 3);

        assert!(url.starts_with("https://climate.weather.gc.ca/climate_data/daily_data_e.html?"));
        assert!(url.contains("StationID=27174"));
        assert!(url.contains("timeframe=2"));
        assert!(url.contains("Year=2020"));
        assert!(url.ends_with("Month=3"));
    }
}
