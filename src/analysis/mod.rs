//! Statistics over parsed records.
//!
//! Every aggregator is a plain function over `&[Record]` plus an
//! [`AnalysisConfig`](crate::config::AnalysisConfig) and returns a
//! serializable result. None of them can fail; an empty input yields an empty
//! or zeroed result.
//!
//! | Module | Statistic |
//! |--------|-----------|
//! | [`words`] | word frequency (pluggable [`Tokenizer`](words::Tokenizer)) |
//! | [`time_bands`] | records per named hour band |
//! | [`length`] | message length summary and histogram |
//! | [`emoji`] | emoji and sticker usage |
//! | [`latency`] | cross-sender reply time |
//! | [`tempo`] | same-sender sending pace and conversation tempo |
//! | [`seasonal`] | records by month and weekday |
//! | [`emotion`] | per-record sentiment via an external [`EmotionScorer`](emotion::EmotionScorer) |
//! | [`summary`] | all of the above in one object |
//!
//! Latency and tempo look at records in timestamp order; everything else is
//! order-independent.

pub mod emoji;
pub mod emotion;
pub mod latency;
pub mod length;
pub mod seasonal;
pub mod summary;
pub mod tempo;
pub mod time_bands;
pub mod words;

use serde::Serialize;

pub use emoji::{EmojiUsage, emoji_usage};
pub use emotion::{EmotionScorer, EmotionScores, UniformScorer, score_records};
pub use latency::{ResponseLatency, response_latency};
pub use length::{MessageLengthStats, message_length};
pub use seasonal::{SeasonalPatterns, seasonal_patterns};
pub use summary::{ConversationSummary, conversation_summary};
pub use tempo::{SendTempo, SpeedTier, TempoTier, send_tempo};
pub use time_bands::{TimeDistribution, time_distribution};
pub use words::{ScriptTokenizer, Tokenizer, WordFrequency, word_frequency};

/// Mean, median, min, max and count of a set of values.
///
/// All fields are zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Summary {
    /// Summarizes `values`.
    ///
    /// ```rust
    /// use talklog::analysis::Summary;
    ///
    /// let s = Summary::of(&[4.0, 1.0, 3.0, 2.0]);
    /// assert_eq!(s.median, 2.5);
    /// assert_eq!((s.min, s.max, s.count), (1.0, 4.0, 4));
    /// assert_eq!(Summary::of(&[]), Summary::default());
    /// ```
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Self {
            mean: sorted.iter().sum::<f64>() / n as f64,
            median,
            min: sorted[0],
            max: sorted[n - 1],
            count: n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A [`Summary`] attributed to one speaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerSummary {
    pub speaker: String,
    #[serde(flatten)]
    pub stats: Summary,
}

/// Groups values by speaker, keeping first-appearance order.
pub(crate) fn group_by_speaker<'a>(
    items: impl IntoIterator<Item = (&'a str, f64)>,
) -> Vec<(&'a str, Vec<f64>)> {
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for (speaker, value) in items {
        match groups.iter_mut().find(|(s, _)| *s == speaker) {
            Some((_, values)) => values.push(value),
            None => groups.push((speaker, vec![value])),
        }
    }
    groups
}
