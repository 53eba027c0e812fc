//! Ordering integrity diagnostics.
//!
//! Talk exports keep messages in the order they were shown in the chat, but
//! the timestamps on those lines come from each sender's device clock and are
//! often non-monotonic. [`OrderingIntegrityReport`] records every place where
//! the physical order and the clock disagree. It is data, never an error, and
//! it never reorders the records it describes.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::record::Record;

/// One adjacent pair whose timestamps go backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderingViolation {
    /// Index in the record sequence of the later record of the pair.
    pub position: usize,
    /// Physical line of the later record.
    pub line_number: usize,
    /// Timestamp of the later record.
    pub current_timestamp: NaiveDateTime,
    /// Timestamp of the record immediately before it.
    pub previous_timestamp: NaiveDateTime,
    /// How far back in time the later record jumps, in minutes.
    #[serde(rename = "inferred_backward_gap")]
    pub backward_gap_minutes: i64,
}

/// Summary of timestamp monotonicity over a physically ordered sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderingIntegrityReport {
    /// Number of records examined.
    pub total_records: usize,
    /// Every adjacent pair where `current < previous`, in sequence order.
    pub violations: Vec<OrderingViolation>,
}

impl OrderingIntegrityReport {
    /// Builds the report by walking `records` in their given (physical) order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use talklog::Record;
    /// use talklog::integrity::OrderingIntegrityReport;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    /// let records = vec![
    ///     Record::message(1, day.and_hms_opt(9, 0, 0).unwrap(), "Alice", "a"),
    ///     Record::message(2, day.and_hms_opt(8, 30, 0).unwrap(), "Bob", "b"),
    /// ];
    ///
    /// let report = OrderingIntegrityReport::from_records(&records);
    /// assert_eq!(report.violations.len(), 1);
    /// assert_eq!(report.violations[0].backward_gap_minutes, 30);
    /// ```
    pub fn from_records(records: &[Record]) -> Self {
        let violations = records
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let (previous, current) = (&pair[0], &pair[1]);
                (current.timestamp() < previous.timestamp()).then(|| OrderingViolation {
                    position: i + 1,
                    line_number: current.line_number(),
                    current_timestamp: current.timestamp(),
                    previous_timestamp: previous.timestamp(),
                    backward_gap_minutes: (previous.timestamp() - current.timestamp())
                        .num_minutes(),
                })
            })
            .collect();

        Self {
            total_records: records.len(),
            violations,
        }
    }

    /// Returns `true` if timestamps never go backwards.
    pub fn is_monotonic(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the number of violations.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Returns the largest backward jump, in minutes.
    pub fn max_backward_gap(&self) -> Option<i64> {
        self.violations.iter().map(|v| v.backward_gap_minutes).max()
    }
}
