//! Fixed window of selectable dates

use chrono::{Duration, Local, NaiveDate};

/// Consecutive days ending on a given date, oldest first
///
/// Computed once when the session starts and never refreshed, so a session
/// left open past midnight keeps offering the same dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    dates: Vec<NaiveDate>,
}

impl DateWindow {
    /// `days` dates ending on `last`
    pub fn ending(last: NaiveDate, days: u32) -> Self {
        let dates = (0..i64::from(days))
            .rev()
            .map(|offset| last - Duration::days(offset))
            .collect();
        Self { dates }
    }

    /// Window ending today in local time
    pub fn ending_today(days: u32) -> Self {
        Self::ending(Local::now().date_naive(), days)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Most recent date, the default selection
    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Label used by the date selector
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seven_day_window() {
        let window = DateWindow::ending(day(2024, 3, 2), 7);
        assert_eq!(window.len(), 7);
        assert_eq!(window.dates()[0], day(2024, 2, 25));
        assert_eq!(window.latest(), Some(day(2024, 3, 2)));
        assert!(window.contains(day(2024, 2, 29)));
        assert!(!window.contains(day(2024, 3, 3)));
    }

    #[test]
    fn test_dates_are_consecutive() {
        let window = DateWindow::ending_today(7);
        for pair in window.dates().windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(date_label(day(2024, 1, 5)), "2024-01-05");
    }
}
