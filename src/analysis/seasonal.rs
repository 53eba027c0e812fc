//! Activity by calendar month and by weekday.

use std::collections::BTreeMap;
use std::collections::HashSet;

use chrono::{Datelike, Weekday};
use serde::Serialize;

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthActivity {
    /// 1-12
    pub month: u32,
    pub records: usize,
    /// Distinct message-kind senders
    pub speakers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayActivity {
    pub weekday: Weekday,
    pub records: usize,
    /// Distinct message-kind senders
    pub speakers: usize,
}

/// Record counts by month (ascending) and weekday (Monday first).
///
/// Months and weekdays with no records are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonalPatterns {
    pub by_month: Vec<MonthActivity>,
    pub by_weekday: Vec<WeekdayActivity>,
}

#[derive(Default)]
struct Bucket<'a> {
    records: usize,
    speakers: HashSet<&'a str>,
}

impl<'a> Bucket<'a> {
    fn add(&mut self, record: &'a Record) {
        self.records += 1;
        if record.is_message() {
            self.speakers.insert(record.sender());
        }
    }
}

/// Groups every record, system notifications included, by month and weekday.
pub fn seasonal_patterns(records: &[Record]) -> SeasonalPatterns {
    let mut months: BTreeMap<u32, Bucket> = BTreeMap::new();
    let mut weekdays: BTreeMap<u32, Bucket> = BTreeMap::new();

    for record in records {
        let date = record.date();
        months.entry(date.month()).or_default().add(record);
        weekdays
            .entry(date.weekday().num_days_from_monday())
            .or_default()
            .add(record);
    }

    SeasonalPatterns {
        by_month: months
            .into_iter()
            .map(|(month, b)| MonthActivity {
                month,
                records: b.records,
                speakers: b.speakers.len(),
            })
            .collect(),
        by_weekday: weekdays
            .into_iter()
            .map(|(day, b)| WeekdayActivity {
                weekday: weekday_from_monday(day),
                records: b.records,
                speakers: b.speakers.len(),
            })
            .collect(),
    }
}

fn weekday_from_monday(n: u32) -> Weekday {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ][n as usize % 7]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn on(line: usize, y: i32, m: u32, d: u32, sender: &str) -> Record {
        let ts = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Record::message(line, ts, sender, "x")
    }

    #[test]
    fn test_empty() {
        assert_eq!(seasonal_patterns(&[]), SeasonalPatterns::default());
    }

    #[test]
    fn test_weekday_order_starts_monday() {
        // 2025-01-19 is a Sunday, 2025-01-13 a Monday, 2025-01-15 a Wednesday.
        let records = vec![
            on(1, 2025, 1, 19, "A"),
            on(2, 2025, 1, 15, "B"),
            on(3, 2025, 1, 13, "A"),
            on(4, 2025, 1, 13, "B"),
        ];
        let patterns = seasonal_patterns(&records);
        let days: Vec<Weekday> = patterns.by_weekday.iter().map(|w| w.weekday).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]);
        assert_eq!(patterns.by_weekday[0].records, 2);
        assert_eq!(patterns.by_weekday[0].speakers, 2);
    }

    #[test]
    fn test_months_merge_across_years() {
        let records = vec![
            on(1, 2024, 12, 31, "A"),
            on(2, 2025, 3, 1, "A"),
            on(3, 2025, 12, 1, "B"),
        ];
        let patterns = seasonal_patterns(&records);
        let months: Vec<(u32, usize, usize)> = patterns
            .by_month
            .iter()
            .map(|m| (m.month, m.records, m.speakers))
            .collect();
        assert_eq!(months, vec![(3, 1, 1), (12, 2, 2)]);
    }

    #[test]
    fn test_system_counted_but_not_a_speaker() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let records = vec![Record::system(1, ts, "joined"), on(2, 2025, 1, 15, "A")];
        let patterns = seasonal_patterns(&records);
        assert_eq!(patterns.by_month[0].records, 2);
        assert_eq!(patterns.by_month[0].speakers, 1);
    }

    #[test]
    fn test_weekday_serializes_short_name() {
        let patterns = seasonal_patterns(&[on(1, 2025, 1, 13, "A")]);
        let json = serde_json::to_value(&patterns).unwrap();
        assert_eq!(json["by_weekday"][0]["weekday"], "Mon");
    }
}
