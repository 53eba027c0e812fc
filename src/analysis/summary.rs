//! One-shot conversation summary.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::emoji::{EmojiUsage, emoji_usage};
use super::latency::{ResponseLatency, response_latency};
use super::length::{MessageLengthStats, message_length};
use super::seasonal::{SeasonalPatterns, seasonal_patterns};
use super::tempo::{SendTempo, send_tempo};
use super::time_bands::{TimeDistribution, time_distribution};
use super::words::{Tokenizer, WordCount, word_frequency};
use crate::config::AnalysisConfig;
use crate::core::index::ConversationIndex;
use crate::record::Record;

/// Number of words kept in [`ConversationSummary::top_words`].
pub const SUMMARY_TOP_WORDS: usize = 20;

/// First and last calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicStats {
    pub total_records: usize,
    pub total_messages: usize,
    pub system_records: usize,
    /// Distinct calendar dates with at least one record
    pub days: usize,
    /// Distinct message-kind senders
    pub participants: usize,
    pub period: Option<Period>,
}

/// Every statistic in one serializable object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub basic: BasicStats,
    pub time_distribution: TimeDistribution,
    pub message_length: MessageLengthStats,
    pub emoji: EmojiUsage,
    pub response_latency: ResponseLatency,
    pub send_tempo: SendTempo,
    pub seasonal: SeasonalPatterns,
    pub top_words: Vec<WordCount>,
}

/// Runs every aggregator over `records`.
///
/// ```rust
/// use talklog::analysis::{ScriptTokenizer, conversation_summary};
/// use talklog::config::AnalysisConfig;
/// use talklog::parser::TalkParser;
///
/// let log = TalkParser::new().parse_str(
///     "2025/1/15(水)\n09:00\tAlice\thello\n[2025/1/15 09:05] Bob: hi",
/// )?;
/// let summary = conversation_summary(&log.records, &ScriptTokenizer, &AnalysisConfig::default());
/// assert_eq!(summary.basic.total_records, 2);
/// assert_eq!(summary.basic.participants, 2);
/// assert_eq!(summary.response_latency.overall.count, 1);
/// # Ok::<(), talklog::TalkError>(())
/// ```
pub fn conversation_summary(
    records: &[Record],
    tokenizer: &dyn Tokenizer,
    config: &AnalysisConfig,
) -> ConversationSummary {
    let index = ConversationIndex::new(records);
    let total_messages = records.iter().filter(|r| r.is_message()).count();
    let days: HashSet<NaiveDate> = records.iter().map(Record::date).collect();

    let basic = BasicStats {
        total_records: records.len(),
        total_messages,
        system_records: records.len() - total_messages,
        days: days.len(),
        participants: index.speakers().len(),
        period: index.date_range().map(|(start, end)| Period { start, end }),
    };

    let mut words = word_frequency(records, tokenizer, config).words;
    words.truncate(SUMMARY_TOP_WORDS);

    ConversationSummary {
        basic,
        time_distribution: time_distribution(records, config),
        message_length: message_length(records, config),
        emoji: emoji_usage(records, config),
        response_latency: response_latency(records, config),
        send_tempo: send_tempo(records, config),
        seasonal: seasonal_patterns(records),
        top_words: words,
    }
}
