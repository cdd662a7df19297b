//! Read-side grouping of stored mean temperatures for the charts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::store::WeatherStore;

/// Mean temperatures bucketed by calendar month across the inclusive year
/// span, chronological within each bucket. Every month key from 1 to 12 is
/// present, empty when nothing fell in it.
pub fn monthly_means(store: &WeatherStore, from_year: i32, to_year: i32) -> BTreeMap<u32, Vec<f32>> {
    let mut buckets: BTreeMap<u32, Vec<f32>> = (1..=12).map(|month| (month, Vec::new())).collect();

    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(from_year, 1, 1),
        NaiveDate::from_ymd_opt(to_year, 12, 31),
    ) else {
        return buckets;
    };

    for date in start.iter_days().take_while(|date| *date <= end) {
        if let Some(mean) = read_mean(store, date) {
            buckets.entry(date.month()).or_default().push(mean);
        }
    }

    buckets
}

/// Day-of-month and mean-temperature sequences for one month, oldest
/// first. Days with nothing stored appear in neither.
pub fn daily_series(store: &WeatherStore, year: i32, month: u32) -> (Vec<u32>, Vec<f32>) {
    let mut days = Vec::new();
    let mut means = Vec::new();

    let Some(start) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return (days, means);
    };

    for date in start
        .iter_days()
        .take_while(|date| date.year() == year && date.month() == month)
    {
        if let Some(mean) = read_mean(store, date) {
            days.push(date.day());
            means.push(mean);
        }
    }

    (days, means)
}

/// A store fault surfaces as a logged gap, never an error.
fn read_mean(store: &WeatherStore, date: NaiveDate) -> Option<f32> {
    match store.read(date) {
        Ok(reading) => reading.map(|reading| reading.mean_temp),
        Err(error) => {
            warn!(%date, %error, "failed to read stored day");
            None
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::DailyReading;

    fn store_with(samples: &[(i32, u32, u32, f32)]) -> WeatherStore {
        let store = WeatherStore::open_in_memory().unwrap();
        store.initialize_schema().unwrap();
        for (year, month, day, mean) in samples {
            let date = NaiveDate::from_ymd_opt(*year, *month, *day).unwrap();
            store
                .write(&DailyReading::new(date, mean + 3.0, mean - 3.0, *mean))
                .unwrap();
        }
        store
    }

    #[test]
    fn should_bucket_means_by_calendar_month_across_years() {
        let store = store_with(&[
            (2020, 1, 15, 1.0),
            (2021, 1, 20, 2.0),
            (2020, 7, 4, 3.0),
        ]);

        let buckets = monthly_means(&store, 2020, 2021);

        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[&1], vec![1.0, 2.0]);
        assert_eq!(buckets[&7], vec![3.0]);
        assert!(buckets[&2].is_empty());
    }

    #[test]
    fn should_ignore_readings_outside_the_year_span() {
        let store = store_with(&[(2019, 12, 31, 9.0), (2020, 1, 1, 1.0), (2022, 1, 1, 9.0)]);

        let buckets = monthly_means(&store, 2020, 2021);

        assert_eq!(buckets[&1], vec![1.0]);
        assert_eq!(buckets[&12], Vec::<f32>::new());
    }

    #[test]
    fn should_list_a_month_in_day_order_with_gaps_left_out() {
        let store = store_with(&[
            (2020, 11, 9, 3.0),
            (2020, 11, 1, 1.0),
            (2020, 11, 3, 2.0),
            (2020, 10, 31, 9.0),
            (2020, 12, 1, 9.0),
        ]);

        let (days, means) = daily_series(&store, 2020, 11);

        assert_eq!(days, vec![1, 3, 9]);
        assert_eq!(means, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn should_return_empty_series_for_a_month_with_no_data() {
        let store = store_with(&[]);

        let (days, means) = daily_series(&store, 2020, 11);

        assert!(days.is_empty());
        assert!(means.is_empty());
    }
}
