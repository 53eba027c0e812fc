//! Reply latency between different speakers.
//!
//! Message-kind records are put in timestamp order. Each adjacent pair on the
//! same calendar date with different senders is a reply; the gap in whole
//! minutes is its latency. Gaps above
//! [`latency_cutoff_minutes`](crate::config::AnalysisConfig::latency_cutoff_minutes)
//! are treated as a new conversation rather than a reply and are dropped.

use serde::Serialize;

use super::{SpeakerSummary, Summary, group_by_speaker};
use crate::config::AnalysisConfig;
use crate::record::{Record, chronological_order};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseLatency {
    /// Over every counted reply
    pub overall: Summary,
    /// Keyed by the replying speaker, first-appearance order
    pub by_responder: Vec<SpeakerSummary>,
}

/// Measures reply latency.
///
/// ```rust
/// use talklog::analysis::response_latency;
/// use talklog::config::AnalysisConfig;
/// use talklog::parser::TalkParser;
///
/// let log = TalkParser::new().parse_str(
///     "[2025/1/15 9:00] Alice: ping\n[2025/1/15 9:10] Bob: pong\n[2025/1/15 10:40] Alice: late",
/// )?;
/// let latency = response_latency(&log.records, &AnalysisConfig::default());
/// assert_eq!(latency.overall.count, 1);
/// assert_eq!(latency.overall.mean, 10.0);
/// # Ok::<(), talklog::TalkError>(())
/// ```
pub fn response_latency(records: &[Record], config: &AnalysisConfig) -> ResponseLatency {
    let messages: Vec<&Record> = chronological_order(records)
        .into_iter()
        .filter(|r| r.is_message())
        .collect();

    let replies: Vec<(&str, f64)> = messages
        .windows(2)
        .filter_map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            if previous.date() != current.date() || previous.sender() == current.sender() {
                return None;
            }
            let gap = (current.timestamp() - previous.timestamp()).num_minutes();
            (gap <= config.latency_cutoff_minutes).then_some((current.sender(), gap as f64))
        })
        .collect();

    let gaps: Vec<f64> = replies.iter().map(|(_, gap)| *gap).collect();
    let by_responder = group_by_speaker(replies)
        .into_iter()
        .map(|(speaker, gaps)| SpeakerSummary {
            speaker: speaker.to_string(),
            stats: Summary::of(&gaps),
        })
        .collect();

    ResponseLatency {
        overall: Summary::of(&gaps),
        by_responder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(line: usize, day: u32, h: u32, m: u32, sender: &str) -> Record {
        let ts = NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        Record::message(line, ts, sender, "x")
    }

    #[test]
    fn test_empty() {
        let latency = response_latency(&[], &AnalysisConfig::default());
        assert!(latency.overall.is_empty());
        assert!(latency.by_responder.is_empty());
    }

    #[test]
    fn test_ten_minute_reply_counted() {
        let records = vec![at(1, 15, 9, 0, "A"), at(2, 15, 9, 10, "B")];
        let latency = response_latency(&records, &AnalysisConfig::default());
        assert_eq!(latency.overall.count, 1);
        assert_eq!(latency.overall.max, 10.0);
        assert_eq!(latency.by_responder[0].speaker, "B");
    }

    #[test]
    fn test_ninety_minute_gap_excluded() {
        let records = vec![at(1, 15, 9, 0, "A"), at(2, 15, 10, 30, "B")];
        let latency = response_latency(&records, &AnalysisConfig::default());
        assert!(latency.overall.is_empty());
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let records = vec![at(1, 15, 9, 0, "A"), at(2, 15, 10, 0, "B")];
        let latency = response_latency(&records, &AnalysisConfig::default());
        assert_eq!(latency.overall.count, 1);
    }

    #[test]
    fn test_same_sender_and_cross_date_skipped() {
        let records = vec![
            at(1, 15, 23, 55, "A"),
            at(2, 16, 0, 5, "B"),
            at(3, 16, 0, 6, "B"),
        ];
        let latency = response_latency(&records, &AnalysisConfig::default());
        assert!(latency.overall.is_empty());
    }

    #[test]
    fn test_uses_timestamp_order() {
        // Physically B comes first but it was sent after A.
        let records = vec![at(1, 15, 9, 5, "B"), at(2, 15, 9, 0, "A")];
        let latency = response_latency(&records, &AnalysisConfig::default());
        assert_eq!(latency.overall.count, 1);
        assert_eq!(latency.overall.mean, 5.0);
        assert_eq!(latency.by_responder[0].speaker, "B");
    }

    #[test]
    fn test_system_records_do_not_break_pairs() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 1, 0)
            .unwrap();
        let records = vec![
            at(1, 15, 9, 0, "A"),
            Record::system(2, ts, "C joined"),
            at(3, 15, 9, 2, "B"),
        ];
        let latency = response_latency(&records, &AnalysisConfig::default());
        assert_eq!(latency.overall.count, 1);
        assert_eq!(latency.overall.mean, 2.0);
    }
}
