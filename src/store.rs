//! SQLite persistence for daily readings.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::reading::DailyReading;

/// Serialization for the `sample_date` key column. Zero-padded ISO-8601
/// keeps lexicographic `MAX(sample_date)` chronological.
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct WeatherStore {
    conn: Connection,
}

impl WeatherStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("opening database `{}`", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Creates the samples table if it is not there yet.
    pub fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS samples (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                sample_date TEXT NOT NULL,
                location TEXT NOT NULL,
                max_temp REAL NOT NULL,
                min_temp REAL NOT NULL,
                avg_temp REAL NOT NULL)",
            [],
        )?;

        Ok(())
    }

    /// Drops the samples table and everything in it.
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DROP TABLE IF EXISTS samples", [])?;

        Ok(())
    }

    pub fn write(&self, reading: &DailyReading) -> Result<()> {
        self.conn.execute(
            "INSERT INTO samples (sample_date, location, max_temp, min_temp, avg_temp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                reading.date.format(DATE_FORMAT).to_string(),
                reading.location,
                reading.max_temp,
                reading.min_temp,
                reading.mean_temp,
            ],
        )?;

        Ok(())
    }

    pub fn read(&self, date: NaiveDate) -> Result<Option<DailyReading>> {
        let row = self
            .conn
            .query_row(
                "SELECT location, max_temp, min_temp, avg_temp FROM samples
                 WHERE sample_date = ?1",
                params![date.format(DATE_FORMAT).to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f32>(1)?,
                        row.get::<_, f32>(2)?,
                        row.get::<_, f32>(3)?,
                    ))
                },
            )
            .optional()?;

        Ok(row.map(|(location, max_temp, min_temp, avg_temp)| DailyReading {
            date,
            location,
            max_temp,
            min_temp,
            mean_temp: avg_temp,
        }))
    }

    /// Most recent stored date, or `None` for an empty store.
    pub fn latest_date(&self) -> Result<Option<NaiveDate>> {
        let latest: Option<String> =
            self.conn
                .query_row("SELECT MAX(sample_date) FROM samples", [], |row| row.get(0))?;

        latest
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                    .with_context(|| format!("stored date `{raw}` is not a calendar date"))
            })
            .transpose()
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(year: i32, month: u32, day: u32, mean: f32) -> DailyReading {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        DailyReading::new(date, mean + 3.0, mean - 3.0, mean)
    }

    fn store() -> WeatherStore {
        let store = WeatherStore::open_in_memory().unwrap();
        store.initialize_schema().unwrap();
        store
    }

    #[test]
    fn should_round_trip_a_reading() {
        let store = store();
        let sample = reading(2020, 11, 9, 2.5);

        store.write(&sample).unwrap();
        let loaded = store.read(sample.date).unwrap();

        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn should_return_none_for_an_absent_date() {
        let store = store();

        let loaded = store.read(NaiveDate::from_ymd_opt(2020, 11, 9).unwrap()).unwrap();

        assert_eq!(loaded, None);
    }

    #[test]
    fn should_report_the_latest_date_chronologically() {
        let store = store();
        store.write(&reading(2020, 11, 9, 1.0)).unwrap();
        store.write(&reading(2020, 11, 10, 2.0)).unwrap();
        store.write(&reading(2020, 10, 30, 3.0)).unwrap();

        let latest = store.latest_date().unwrap();

        assert_eq!(latest, NaiveDate::from_ymd_opt(2020, 11, 10));
    }

    #[test]
    fn should_report_no_latest_date_for_an_empty_store() {
        let store = store();

        assert_eq!(store.latest_date().unwrap(), None);
    }

    #[test]
    fn should_start_fresh_after_a_clear() {
        let store = store();
        let sample = reading(2020, 11, 9, 2.5);
        store.write(&sample).unwrap();

        store.clear_all().unwrap();
        store.initialize_schema().unwrap();

        assert_eq!(store.read(sample.date).unwrap(), None);
    }

    #[test]
    fn should_tolerate_clearing_an_empty_database() {
        let store = WeatherStore::open_in_memory().unwrap();

        store.clear_all().unwrap();
        store.clear_all().unwrap();
    }
}
