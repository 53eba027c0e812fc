//! Read-only views over a parsed record sequence.
//!
//! [`ConversationIndex`] borrows the records and answers the questions a
//! viewer asks first: who is talking, over which dates, what was said on a
//! given day or by a given person, and where a keyword appears.
//!
//! All views keep physical order. Use [`ConversationIndex::chronological`]
//! when timestamp order is wanted instead.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::parser::ParsedLog;
use crate::record::{Record, chronological_order};

/// Record and speaker counts for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Every record on this date, system notifications included
    pub records: usize,
    /// Distinct message-kind senders on this date
    pub speakers: usize,
}

/// Derived views over a record sequence.
///
/// # Example
///
/// ```rust
/// use talklog::core::ConversationIndex;
/// use talklog::parser::TalkParser;
///
/// let log = TalkParser::new().parse_str(
///     "2025/1/15(水)\n09:00\tAlice\thello\n[2025/1/15 09:05] Bob: hi",
/// )?;
/// let index = ConversationIndex::from_log(&log);
///
/// assert_eq!(index.speakers(), ["Alice", "Bob"]);
/// assert_eq!(index.search("HELLO").len(), 1);
/// # Ok::<(), talklog::TalkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConversationIndex<'a> {
    records: &'a [Record],
    speakers: Vec<&'a str>,
}

impl<'a> ConversationIndex<'a> {
    /// Indexes a record sequence in physical order.
    pub fn new(records: &'a [Record]) -> Self {
        let mut seen = HashSet::new();
        let speakers = records
            .iter()
            .filter(|r| r.is_message())
            .map(Record::sender)
            .filter(|s| seen.insert(*s))
            .collect();
        Self { records, speakers }
    }

    /// Indexes the records of a parse result.
    pub fn from_log(log: &'a ParsedLog) -> Self {
        Self::new(&log.records)
    }

    /// Returns the indexed records in physical order.
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct message-kind senders in order of first appearance.
    pub fn speakers(&self) -> &[&'a str] {
        &self.speakers
    }

    /// Earliest and latest calendar date; `None` only when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(Record::date).min()?;
        let max = self.records.iter().map(Record::date).max()?;
        Some((min, max))
    }

    /// Records on `date`.
    pub fn filter_by_date(&self, date: NaiveDate) -> Vec<&'a Record> {
        self.records.iter().filter(|r| r.date() == date).collect()
    }

    /// Records whose sender is exactly `speaker`.
    pub fn filter_by_speaker(&self, speaker: &str) -> Vec<&'a Record> {
        self.records
            .iter()
            .filter(|r| r.sender() == speaker)
            .collect()
    }

    /// Records whose body contains `keyword`, ignoring case.
    ///
    /// An empty keyword matches every record.
    pub fn search(&self, keyword: &str) -> Vec<&'a Record> {
        if keyword.is_empty() {
            return self.records.iter().collect();
        }
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.body().to_lowercase().contains(&needle))
            .collect()
    }

    /// Per-date counts, ascending by date.
    pub fn daily_stats(&self) -> Vec<DailyStats> {
        let mut days: BTreeMap<NaiveDate, (usize, HashSet<&str>)> = BTreeMap::new();
        for record in self.records {
            let (count, speakers) = days.entry(record.date()).or_default();
            *count += 1;
            if record.is_message() {
                speakers.insert(record.sender());
            }
        }
        days.into_iter()
            .map(|(date, (records, speakers))| DailyStats {
                date,
                records,
                speakers: speakers.len(),
            })
            .collect()
    }

    /// Records in timestamp order; ties keep physical order.
    pub fn chronological(&self) -> Vec<&'a Record> {
        chronological_order(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::message(1, day(15).and_hms_opt(9, 0, 0).unwrap(), "Alice", "Hello there"),
            Record::system(2, day(15).and_hms_opt(9, 1, 0).unwrap(), "Carol joined"),
            Record::message(3, day(16).and_hms_opt(8, 0, 0).unwrap(), "Bob", "おはよう"),
            Record::message(4, day(14).and_hms_opt(23, 0, 0).unwrap(), "Alice", "hello again"),
        ]
    }

    #[test]
    fn test_speakers_first_appearance() {
        let records = sample();
        let index = ConversationIndex::new(&records);
        assert_eq!(index.speakers(), ["Alice", "Bob"]);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_date_range() {
        let records = sample();
        assert_eq!(
            ConversationIndex::new(&records).date_range(),
            Some((day(14), day(16)))
        );
        assert_eq!(ConversationIndex::new(&[]).date_range(), None);
        assert!(ConversationIndex::new(&[]).is_empty());
    }

    #[test]
    fn test_filters_keep_physical_order() {
        let records = sample();
        let index = ConversationIndex::new(&records);
        let alice: Vec<usize> = index
            .filter_by_speaker("Alice")
            .iter()
            .map(|r| r.line_number())
            .collect();
        assert_eq!(alice, vec![1, 4]);
        assert_eq!(index.filter_by_date(day(15)).len(), 2);
        assert!(index.filter_by_speaker("alice").is_empty());
    }

    #[test]
    fn test_search() {
        let records = sample();
        let index = ConversationIndex::new(&records);
        assert_eq!(index.search("HELLO").len(), 2);
        assert_eq!(index.search("おはよう").len(), 1);
        assert_eq!(index.search("").len(), 4);
        assert!(index.search("missing").is_empty());
    }

    #[test]
    fn test_daily_stats() {
        let records = sample();
        let stats = ConversationIndex::new(&records).daily_stats();
        let dates: Vec<NaiveDate> = stats.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(14), day(15), day(16)]);
        assert_eq!(stats[1].records, 2);
        assert_eq!(stats[1].speakers, 1);
    }

    #[test]
    fn test_chronological_view() {
        let records = sample();
        let lines: Vec<usize> = ConversationIndex::new(&records)
            .chronological()
            .iter()
            .map(|r| r.line_number())
            .collect();
        assert_eq!(lines, vec![4, 1, 2, 3]);
    }
}
