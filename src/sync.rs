//! Month-by-month synchronization of scraped readings into the store.

use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};
use tracing::{debug, info, warn};

use crate::fetch::PageSource;
use crate::scrape::{scan_page, MonthScan};
use crate::store::WeatherStore;

/// How a run treats data already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Erase the store and re-scrape the full available history.
    Full,
    /// Only walk back to the latest stored date.
    Update,
}

/// Counters reported back to the caller after a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub months_scanned: u32,
    pub days_added: u32,
}

/// Walks month pages backwards from `start`, scanning each and persisting
/// the days the store does not have yet.
pub async fn run<S: PageSource>(
    mode: SyncMode,
    start: NaiveDate,
    site: &S,
    store: &WeatherStore,
) -> Result<SyncOutcome> {
    match mode {
        SyncMode::Full => full_rebuild(start, site, store).await,
        SyncMode::Update => incremental(start, site, store).await,
    }
}

/// Backward walk over month pages. The cursor keeps its day-of-month from
/// step to step, clamped at the end of shorter months.
struct SyncSession {
    cursor: NaiveDate,
}

impl SyncSession {
    fn new(start: NaiveDate) -> Self {
        Self { cursor: start }
    }

    fn step_back(&mut self) -> bool {
        match self.cursor.checked_sub_months(Months::new(1)) {
            Some(previous) => {
                self.cursor = previous;
                true
            }
            None => false,
        }
    }
}

/// Rebuilds the store from scratch, walking backwards until the site runs
/// out of history and starts serving its earliest month instead.
async fn full_rebuild<S: PageSource>(
    start: NaiveDate,
    site: &S,
    store: &WeatherStore,
) -> Result<SyncOutcome> {
    store.clear_all()?;
    store.initialize_schema()?;

    let mut session = SyncSession::new(start);
    let mut outcome = SyncOutcome::default();

    loop {
        if let Some(scan) = scan_month(site, &session, &mut outcome).await {
            if !scan.matches_request {
                info!(
                    year = session.cursor.year(),
                    month = session.cursor.month(),
                    "no data for the requested month; history exhausted"
                );
                break;
            }
            outcome.days_added += persist_new_days(store, &scan);
        }
        if !session.step_back() {
            break;
        }
    }

    Ok(outcome)
}

/// Walks back only as far as the latest stored date. The month containing
/// it is scanned, so days that appeared since the last run are picked up;
/// anything older stays untouched.
async fn incremental<S: PageSource>(
    start: NaiveDate,
    site: &S,
    store: &WeatherStore,
) -> Result<SyncOutcome> {
    let Some(terminal) = store.latest_date()? else {
        info!("store is empty; scraping the full history instead");
        return full_rebuild(start, site, store).await;
    };

    let mut session = SyncSession::new(start);
    let mut outcome = SyncOutcome::default();

    loop {
        if let Some(scan) = scan_month(site, &session, &mut outcome).await {
            outcome.days_added += persist_new_days(store, &scan);
        }
        if !session.step_back() || session.cursor <= terminal {
            break;
        }
    }

    Ok(outcome)
}

/// Fetches and scans the cursor month. A fetch failure is logged and the
/// month is skipped; the walk itself carries on.
async fn scan_month<S: PageSource>(
    site: &S,
    session: &SyncSession,
    outcome: &mut SyncOutcome,
) -> Option<MonthScan> {
    let (year, month) = (session.cursor.year(), session.cursor.month());
    outcome.months_scanned += 1;

    match site.fetch(year, month).await {
        Ok(markup) => {
            let scan = scan_page(&markup, year, month);
            debug!(year, month, days = scan.readings.len(), "scanned month page");
            Some(scan)
        }
        Err(error) => {
            warn!(year, month, %error, "skipping month: fetch failed");
            None
        }
    }
}

/// Writes the days the store does not already have. A storage fault costs
/// the affected day, nothing more.
fn persist_new_days(store: &WeatherStore, scan: &MonthScan) -> u32 {
    let mut added = 0;

    for reading in scan.readings.values() {
        match store.read(reading.date) {
            Ok(Some(_)) => {}
            Ok(None) => match store.write(reading) {
                Ok(()) => added += 1,
                Err(error) => warn!(date = %reading.date, %error, "failed to write reading"),
            },
            Err(error) => {
                warn!(date = %reading.date, %error, "failed to check for an existing reading");
            }
        }
    }

    added
}

// -- Tests -------------------------------------------------------------------
