//! Trading-day date helpers
//!
//! The brief is written "today" about the close of the previous trading day.
//! Only weekends are skipped: exchange holidays are not known here, so the
//! Tuesday after a Monday holiday still reports on that Monday.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Long-form date layout, e.g. `Friday, March 7, 2025`
const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Display and target dates for one brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingDayResult {
    pub display_date: String,
    pub target_date: String,
}

impl TradingDayResult {
    /// Build both date strings for the given reference date
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            display_date: format_long_date(date),
            target_date: previous_trading_day(date),
        }
    }
}

/// Render a date as `<Weekday>, <Month> <Day>, <Year>`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

/// Previous weekday before `date`, formatted with [`format_long_date`]
pub fn previous_trading_day(date: NaiveDate) -> String {
    format_long_date(previous_trading_date(date))
}

/// Previous weekday before `date`
pub fn previous_trading_date(date: NaiveDate) -> NaiveDate {
    let offset = match date.weekday() {
        Weekday::Mon => 3,
        Weekday::Sun => 2,
        Weekday::Sat => 1,
        _ => 1,
    };

    // Subtracting at most three days only fails at the very start of the
    // calendar range, which no reference date can reach.
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
