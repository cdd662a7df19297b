//! Streaming scan of one month's daily-data page.
//!
//! The climate site's daily table holds one row per day: a `<th>` header
//! whose `<abbr>` shows the day number and carries the full date in its
//! `title` attribute, followed by `<td>` cells for the maximum, minimum and
//! mean temperatures. Cells without an observation hold a placeholder such
//! as `M`. The scanner walks the parsed document's open/close events with a
//! small state struct and keeps a day only once all three of its
//! temperatures have parsed.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ego_tree::iter::Edge;
use scraper::node::Element;
use scraper::{Html, Node};

use crate::reading::DailyReading;

/// Cell ordinals 1 to 3 map to max, min and mean; the rest of the row
/// (precipitation, gusts and so on) is skipped.
const LAST_TEMPERATURE_CELL: u32 = 3;

/// What one fetched page yielded.
#[derive(Debug)]
pub struct MonthScan {
    /// Complete days keyed by date, in calendar order.
    pub readings: BTreeMap<NaiveDate, DailyReading>,
    /// Whether the page is really for the requested year and month. Asked
    /// for a month before its records begin, the site silently serves the
    /// earliest month it has instead of an error page.
    pub matches_request: bool,
}

/// Scans the daily-data document fetched for `year`/`month`.
pub fn scan_page(markup: &str, year: i32, month: u32) -> MonthScan {
    let document = Html::parse_document(markup);
    let mut state = ScanState::new(year, month);

    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => state.open_element(element),
                Node::Text(text) => state.text(text),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    state.close_element(element.name());
                }
            }
        }
    }

    state.finish()
}

/// A day under assembly while its row is scanned. Committed to the output
/// only when the scan moves past it with every temperature parsed.
#[derive(Debug, Default)]
struct PendingDay {
    day: u32,
    max: Option<f32>,
    min: Option<f32>,
    mean: Option<f32>,
    incomplete: bool,
}

struct ScanState {
    year: i32,
    month: u32,
    in_body: bool,
    in_row: bool,
    in_header: bool,
    in_date_marker: bool,
    in_data_cell: bool,
    /// 1-based position of the current cell within its row.
    cell: u32,
    /// Cleared when the row's day marker fails to parse as a number, which
    /// is how the table's summary rows are told apart from day rows.
    date_row: bool,
    /// `None` until the first date marker has been inspected.
    page_match: Option<bool>,
    pending: Option<PendingDay>,
    readings: BTreeMap<NaiveDate, DailyReading>,
}

impl ScanState {
    fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            in_body: false,
            in_row: false,
            in_header: false,
            in_date_marker: false,
            in_data_cell: false,
            cell: 1,
            date_row: false,
            page_match: None,
            pending: None,
            readings: BTreeMap::new(),
        }
    }

    fn open_element(&mut self, element: &Element) {
        match element.name() {
            "tbody" => self.in_body = true,
            "tr" if self.in_body => {
                self.in_row = true;
                self.cell = 1;
            }
            "th" if self.in_row => self.in_header = true,
            "abbr" if self.in_header => {
                self.in_date_marker = true;
                self.date_row = true;
                if self.page_match.is_none() {
                    self.page_match = Some(self.title_matches(element));
                }
            }
            "td" if self.in_row && self.cell <= LAST_TEMPERATURE_CELL => {
                self.in_data_cell = true;
            }
            _ => {}
        }
    }

    fn close_element(&mut self, name: &str) {
        match name {
            "tbody" => self.in_body = false,
            "tr" => {
                self.in_row = false;
                self.date_row = false;
                self.cell = 1;
            }
            "th" => self.in_header = false,
            "abbr" => self.in_date_marker = false,
            "td" => {
                self.in_data_cell = false;
                self.cell += 1;
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let value = text.trim();
        if value.is_empty() {
            return;
        }
        if self.in_date_marker {
            self.start_day(value);
        } else if self.in_data_cell && self.date_row {
            self.record_cell(value);
        }
    }

    /// Checked once per page, against the first date marker seen. The
    /// marker's `title` holds the full date, e.g. "November 1, 2020"; a
    /// missing or unreadable title counts as a match.
    fn title_matches(&self, element: &Element) -> bool {
        match element
            .attr("title")
            .map(|title| NaiveDate::parse_from_str(title.trim(), "%B %d, %Y"))
        {
            Some(Ok(actual)) => actual.year() == self.year && actual.month() == self.month,
            _ => true,
        }
    }

    fn start_day(&mut self, value: &str) {
        match value.parse::<u32>() {
            Ok(day) => {
                self.commit_pending();
                self.pending = Some(PendingDay {
                    day,
                    ..PendingDay::default()
                });
            }
            Err(_) => self.date_row = false,
        }
    }

    fn record_cell(&mut self, value: &str) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if pending.incomplete {
            return;
        }
        let Ok(temperature) = value.parse::<f32>() else {
            pending.incomplete = true;
            return;
        };
        match self.cell {
            1 => pending.max = Some(temperature),
            2 => pending.min = Some(temperature),
            3 => pending.mean = Some(temperature),
            _ => {}
        }
    }

    /// Closes out the previous day. A day missing any of its three
    /// temperatures is dropped whole.
    fn commit_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.incomplete {
            return;
        }
        let (Some(max), Some(min), Some(mean)) = (pending.max, pending.min, pending.mean) else {
            return;
        };
        let Some(date) = NaiveDate::from_ymd_opt(self.year, self.month, pending.day) else {
            return;
        };
        self.readings
            .insert(date, DailyReading::new(date, max, min, mean));
    }

    fn finish(mut self) -> MonthScan {
        self.commit_pending();
        MonthScan {
            readings: self.readings,
            matches_request: self.page_match.unwrap_or(false),
        }
    }
}

// -- Tests -------------------------------------------------------------------
