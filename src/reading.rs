//! Daily temperature observation for one station.

use chrono::NaiveDate;

/// Station label stored alongside every reading.
pub const LOCATION: &str = "Winnipeg, MB";

/// One day's temperatures, in degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub location: String,
    pub max_temp: f32,
    pub min_temp: f32,
    pub mean_temp: f32,
}

impl DailyReading {
    pub fn new(date: NaiveDate, max_temp: f32, min_temp: f32, mean_temp: f32) -> Self {
        Self {
            date,
            location: LOCATION.to_string(),
            max_temp,
            min_temp,
            mean_temp,
        }
    }
}
